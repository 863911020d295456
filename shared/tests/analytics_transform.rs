use proptest::prelude::*;
use serde_json::{json, Map, Value};
use shared::analytics::{series_from_map, CountMap};
use shared::labels::translate;
use shared::{ReportAnalytics, ReportDto, ReportType};

proptest! {
    #[test]
    fn unknown_keys_pass_through(key in "[a-z][a-z_]{0,12}", value in 0_u32..10_000) {
        // lower-case keys never appear in the label table
        let mut object = Map::new();
        object.insert(key.clone(), json!(value));
        let map: CountMap = serde_json::from_value(Value::Object(object)).unwrap();
        let series = series_from_map(&map);
        prop_assert_eq!(series.len(), 1);
        prop_assert_eq!(&series[0].name, &key);
        prop_assert_eq!(series[0].value, value as f64);
    }

    #[test]
    fn series_values_are_never_negative(values in proptest::collection::vec(-1e6_f64..1e6, 0..20)) {
        let mut object = Map::new();
        for (i, v) in values.iter().enumerate() {
            object.insert(format!("K{}", i), json!(v));
        }
        let map: CountMap = serde_json::from_value(Value::Object(object)).unwrap();
        let series = series_from_map(&map);
        prop_assert_eq!(series.len(), values.len());
        prop_assert!(series.iter().all(|p| p.value >= 0.0));
    }
}

#[test]
fn every_report_type_accepts_an_empty_object() {
    for report_type in ReportType::ALL {
        let analytics = ReportAnalytics::from(ReportDto::from_value(report_type, json!({})).unwrap());
        assert!(!analytics.is_sample());
        assert!(analytics.charts.iter().all(|c| c.series.is_empty()));
    }
}

#[test]
fn inventory_report_end_to_end() {
    let payload = json!({
        "totalItems": 40,
        "lowStockItems": 3,
        "totalValue": 1520.75,
        "categoryDistribution": {"FOOD": 20, "HYGIENE": 8, "SPORTS": 12},
        "stockStatus": {"IN_STOCK": 35, "LOW_STOCK": 3, "OUT_OF_STOCK": 2}
    });
    let analytics = ReportAnalytics::from(ReportDto::from_value(ReportType::Inventory, payload).unwrap());

    let categories = analytics.chart("Categories").unwrap();
    let names: Vec<&str> = categories.series.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Hygiene", "SPORTS"]);

    let value = analytics.summary.iter().find(|s| s.label == "Stock value").unwrap();
    assert_eq!(value.value.to_string(), "1,520.75");
    assert_eq!(translate("OUT_OF_STOCK"), "Out of Stock");
}

#[test]
fn monthly_trend_follows_response_order() {
    let body = r#"{
        "totalOrphans": 12,
        "monthlyAdmissions": {"OCTOBER": 2, "NOVEMBER": 5, "DECEMBER": 1, "JANUARY": 4}
    }"#;
    let analytics = ReportAnalytics::from(ReportDto::from_json(ReportType::Orphans, body).unwrap());

    let trend = analytics.chart("Monthly admissions").unwrap();
    let names: Vec<&str> = trend.series.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Oct", "Nov", "Dec", "Jan"]);
    assert_eq!(trend.series[1].value, 5.0);
}
