use yew::prelude::*;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use shared::{ChartKind, ChartPanel, ChartPoint};

use crate::services::logging::Logger;

const CANVAS_WIDTH: u32 = 560;
const CANVAS_HEIGHT: u32 = 300;
const PRIMARY: RGBColor = RGBColor(102, 126, 234);

#[derive(Properties, PartialEq)]
pub struct AnalyticsChartProps {
    pub panel: ChartPanel,
}

pub enum Msg {
    Redraw,
}

/// One chart panel drawn with plotters onto a canvas
pub struct AnalyticsChart {
    canvas_ref: NodeRef,
}

impl Component for AnalyticsChart {
    type Message = Msg;
    type Properties = AnalyticsChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Redraw => {
                self.draw_chart(&ctx.props().panel);
                false
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().panel != old_props.panel {
            ctx.link().send_message(Msg::Redraw);
        }
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw_chart(&ctx.props().panel);
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let panel = &ctx.props().panel;
        html! {
            <div class="chart-panel">
                <h4 class="chart-title">{panel.title}</h4>
                {if panel.series.is_empty() {
                    html! {
                        <div class="chart-empty">
                            <i class="fas fa-chart-bar chart-empty-icon"></i>
                            <p>{"No data for this chart"}</p>
                        </div>
                    }
                } else {
                    html! {
                        <canvas
                            ref={self.canvas_ref.clone()}
                            class="analytics-canvas"
                            width={CANVAS_WIDTH.to_string()}
                            height={CANVAS_HEIGHT.to_string()}
                        ></canvas>
                    }
                }}
            </div>
        }
    }
}

/// Upper bound of the value axis: 10% headroom, never below 1
fn y_axis_max(series: &[ChartPoint]) -> f64 {
    let max = series.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    (max * 1.1).max(1.0)
}

fn category_label(names: &[String], value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            names.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    }
}

#[derive(Debug, thiserror::Error)]
enum ChartError {
    #[error("canvas is not mounted")]
    NoCanvas,
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("{step}: {message}")]
    Plot { step: &'static str, message: String },
}

fn plot_err<E: std::fmt::Debug>(step: &'static str) -> impl FnOnce(E) -> ChartError {
    move |e| ChartError::Plot {
        step,
        message: format!("{:?}", e),
    }
}

impl AnalyticsChart {
    fn draw_chart(&self, panel: &ChartPanel) {
        if panel.series.is_empty() {
            return;
        }
        if let Err(e) = self.try_draw(panel) {
            Logger::warn_with_component("chart", &format!("could not draw \"{}\": {}", panel.title, e));
        }
    }

    fn try_draw(&self, panel: &ChartPanel) -> Result<(), ChartError> {
        let canvas = self
            .canvas_ref
            .cast::<HtmlCanvasElement>()
            .ok_or(ChartError::NoCanvas)?;
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let backend = CanvasBackend::with_canvas_object(canvas).ok_or(ChartError::NoContext)?;
        let root = backend.into_drawing_area();
        root.fill(&WHITE).map_err(plot_err("fill background"))?;

        let names: Vec<String> = panel.series.iter().map(|p| p.name.clone()).collect();
        let count = panel.series.len() as u32;
        let y_max = y_axis_max(&panel.series);

        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..count).into_segmented(), 0.0..y_max)
            .map_err(plot_err("build axes"))?;

        let label_formatter = |v: &SegmentValue<u32>| category_label(&names, v);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(count as usize)
            .x_label_formatter(&label_formatter)
            .y_label_formatter(&|v| format!("{:.0}", v))
            .label_style(("sans-serif", 12, &PRIMARY))
            .axis_style(&RGBColor(230, 230, 230))
            .bold_line_style(&RGBColor(245, 245, 245))
            .light_line_style(&RGBColor(250, 250, 250))
            .y_labels(6)
            .draw()
            .map_err(plot_err("draw mesh"))?;

        match panel.kind {
            ChartKind::Bar => {
                chart
                    .draw_series(
                        Histogram::vertical(&chart)
                            .style(PRIMARY.filled())
                            .margin(12)
                            .data(panel.series.iter().enumerate().map(|(i, p)| (i as u32, p.value))),
                    )
                    .map_err(plot_err("draw bars"))?;
            }
            ChartKind::Line => {
                let points: Vec<(SegmentValue<u32>, f64)> = panel
                    .series
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (SegmentValue::CenterOf(i as u32), p.value))
                    .collect();
                chart
                    .draw_series(LineSeries::new(points.clone(), PRIMARY.stroke_width(3)))
                    .map_err(plot_err("draw line"))?;
                chart
                    .draw_series(points.into_iter().map(|p| Circle::new(p, 4, PRIMARY.filled())))
                    .map_err(plot_err("draw points"))?;
            }
        }

        root.present().map_err(plot_err("present"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn point(name: &str, value: f64) -> ChartPoint {
        ChartPoint { name: name.to_string(), value }
    }

    #[wasm_bindgen_test]
    fn test_y_axis_headroom() {
        assert_eq!(y_axis_max(&[]), 1.0);
        assert_eq!(y_axis_max(&[point("a", 0.0)]), 1.0);
        let max = y_axis_max(&[point("a", 10.0), point("b", 40.0)]);
        assert!((max - 44.0).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn test_category_labels() {
        let names = vec!["Male".to_string(), "Female".to_string()];
        assert_eq!(category_label(&names, &SegmentValue::CenterOf(1)), "Female");
        assert_eq!(category_label(&names, &SegmentValue::Exact(0)), "Male");
        assert_eq!(category_label(&names, &SegmentValue::CenterOf(5)), "");
        assert_eq!(category_label(&names, &SegmentValue::Last), "");
    }

    #[wasm_bindgen_test]
    fn test_unmounted_canvas_is_reported() {
        let chart = AnalyticsChart { canvas_ref: NodeRef::default() };
        let panel = ChartPanel {
            title: "Gender",
            kind: ChartKind::Bar,
            series: vec![point("Male", 3.0)],
        };
        assert!(matches!(chart.try_draw(&panel), Err(ChartError::NoCanvas)));
        // logged, not raised
        chart.draw_chart(&panel);
    }

    #[wasm_bindgen_test]
    fn test_plot_error_names_the_step() {
        let err = plot_err("draw bars")("backend gone");
        assert_eq!(err.to_string(), "draw bars: \"backend gone\"");
    }
}
