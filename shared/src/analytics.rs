//! Report analytics: reshaping backend report payloads into chart series.
//!
//! Every report type has its own DTO, but all of them are made of the same
//! two ingredients: summary scalars, which pass through unchanged, and
//! `{key: number}` maps, which become `{name, value}` series. The map keys are
//! translated with [`crate::labels::translate`]; unknown keys are kept.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::format::{format_amount, percentage};
use crate::labels::translate;

/// One bar or point in a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

pub type ChartSeries = Vec<ChartPoint>;

/// A `{key: number}` JSON object decoded in document order.
///
/// Values may arrive as numbers or numeric strings; anything else counts as
/// zero. `null` decodes to an empty map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountMap(Vec<(String, f64)>);

impl CountMap {
    pub fn entries(&self) -> &[(String, f64)] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, v)| v.max(0.0)).sum()
    }
}

impl<K: Into<String>> From<Vec<(K, f64)>> for CountMap {
    fn from(entries: Vec<(K, f64)>) -> Self {
        Self(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawNumber {
    fn into_f64(self) -> f64 {
        match self {
            RawNumber::Number(n) => n,
            RawNumber::Text(s) => s.trim().parse().unwrap_or(0.0),
            RawNumber::Other(_) => 0.0,
        }
    }
}

struct CountMapVisitor;

impl<'de> Visitor<'de> for CountMapVisitor {
    type Value = CountMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of numeric values")
    }

    fn visit_unit<E: de::Error>(self) -> Result<CountMap, E> {
        Ok(CountMap::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<CountMap, E> {
        Ok(CountMap::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<CountMap, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, RawNumber>()? {
            entries.push((key, value.into_f64()));
        }
        Ok(CountMap(entries))
    }
}

impl<'de> Deserialize<'de> for CountMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CountMapVisitor)
    }
}

/// Turn a count map into a chart series.
///
/// Names are translated, order is preserved, and negative or non-finite
/// values are reported as zero.
pub fn series_from_map(map: &CountMap) -> ChartSeries {
    map.entries()
        .iter()
        .map(|(key, value)| ChartPoint {
            name: translate(key).into_owned(),
            value: if value.is_finite() { value.max(0.0) } else { 0.0 },
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportType {
    Orphans,
    Inventory,
    Staff,
    Fundraising,
    Volunteers,
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::Orphans,
        ReportType::Inventory,
        ReportType::Staff,
        ReportType::Fundraising,
        ReportType::Volunteers,
    ];

    /// Path segment under `/app/oims/reports/`
    pub fn path_segment(&self) -> &'static str {
        match self {
            ReportType::Orphans => "orphans",
            ReportType::Inventory => "inventory",
            ReportType::Staff => "staff",
            ReportType::Fundraising => "fundraising",
            ReportType::Volunteers => "volunteers",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Orphans => "Orphans",
            ReportType::Inventory => "Inventory",
            ReportType::Staff => "Staff",
            ReportType::Fundraising => "Fundraising",
            ReportType::Volunteers => "Volunteers",
        }
    }
}

/// Downloadable report file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Excel,
}

impl ReportFormat {
    pub fn query_value(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "PDF",
            ReportFormat::Excel => "EXCEL",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "application/pdf",
            ReportFormat::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    pub fn file_name(&self, report_type: ReportType) -> String {
        format!("{}-report.{}", report_type.path_segment(), self.extension())
    }
}

/// Where the numbers in a [`ReportAnalytics`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Live,
    /// Built-in placeholder numbers shown because the fetch failed
    Sample,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SummaryValue {
    Count(u64),
    Amount(f64),
    Percent(f64),
    Decimal(f64),
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryValue::Count(n) => write!(f, "{}", n),
            SummaryValue::Amount(a) => f.write_str(&format_amount(*a)),
            SummaryValue::Percent(p) => write!(f, "{:.1}%", p),
            SummaryValue::Decimal(d) => write!(f, "{:.1}", d),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStat {
    pub label: &'static str,
    pub value: SummaryValue,
}

impl SummaryStat {
    fn new(label: &'static str, value: SummaryValue) -> Self {
        Self { label, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub title: &'static str,
    pub kind: ChartKind,
    pub series: ChartSeries,
}

impl ChartPanel {
    fn bar(title: &'static str, map: &CountMap) -> Self {
        Self {
            title,
            kind: ChartKind::Bar,
            series: series_from_map(map),
        }
    }

    fn line(title: &'static str, map: &CountMap) -> Self {
        Self {
            title,
            kind: ChartKind::Line,
            series: series_from_map(map),
        }
    }
}

/// View-ready analytics for one report tab
#[derive(Debug, Clone, PartialEq)]
pub struct ReportAnalytics {
    pub report_type: ReportType,
    pub summary: Vec<SummaryStat>,
    pub charts: Vec<ChartPanel>,
    pub source: DataSource,
}

impl ReportAnalytics {
    pub fn is_sample(&self) -> bool {
        self.source == DataSource::Sample
    }

    pub fn chart(&self, title: &str) -> Option<&ChartPanel> {
        self.charts.iter().find(|c| c.title == title)
    }

    /// Placeholder analytics used when the report endpoint cannot be reached.
    /// Always marked [`DataSource::Sample`] so the view can say so.
    pub fn sample(report_type: ReportType) -> Self {
        let mut analytics = ReportAnalytics::from(ReportDto::sample(report_type));
        analytics.source = DataSource::Sample;
        analytics
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrphanReportDto {
    pub total_orphans: u64,
    pub new_admissions: u64,
    pub adopted: u64,
    pub average_age: f64,
    pub gender_distribution: CountMap,
    pub age_distribution: CountMap,
    pub education_levels: CountMap,
    pub monthly_admissions: CountMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryReportDto {
    pub total_items: u64,
    pub low_stock_items: u64,
    pub out_of_stock_items: u64,
    pub total_value: f64,
    pub category_distribution: CountMap,
    pub stock_status: CountMap,
    pub monthly_consumption: CountMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffReportDto {
    pub total_staff: u64,
    pub active_staff: u64,
    pub suspended_staff: u64,
    pub role_distribution: CountMap,
    pub gender_distribution: CountMap,
    pub branch_distribution: CountMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundraisingReportDto {
    pub total_raised: f64,
    pub total_goal: f64,
    pub active_campaigns: u64,
    pub completed_campaigns: u64,
    pub campaign_status: CountMap,
    pub category_totals: CountMap,
    pub monthly_donations: CountMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolunteerReportDto {
    pub total_volunteers: u64,
    pub active_volunteers: u64,
    pub total_hours: f64,
    pub skill_distribution: CountMap,
    pub gender_distribution: CountMap,
    pub monthly_hours: CountMap,
}

/// A decoded report payload, tagged by the report it belongs to
#[derive(Debug, Clone, PartialEq)]
pub enum ReportDto {
    Orphans(OrphanReportDto),
    Inventory(InventoryReportDto),
    Staff(StaffReportDto),
    Fundraising(FundraisingReportDto),
    Volunteers(VolunteerReportDto),
}

impl ReportDto {
    /// Decode a raw analytics response body for `report_type`.
    ///
    /// Decodes straight from the text so count maps keep the order the
    /// backend wrote them in.
    pub fn from_json(report_type: ReportType, body: &str) -> Result<Self, serde_json::Error> {
        Ok(match report_type {
            ReportType::Orphans => ReportDto::Orphans(serde_json::from_str(body)?),
            ReportType::Inventory => ReportDto::Inventory(serde_json::from_str(body)?),
            ReportType::Staff => ReportDto::Staff(serde_json::from_str(body)?),
            ReportType::Fundraising => ReportDto::Fundraising(serde_json::from_str(body)?),
            ReportType::Volunteers => ReportDto::Volunteers(serde_json::from_str(body)?),
        })
    }

    /// Decode the analytics JSON returned for `report_type`
    pub fn from_value(report_type: ReportType, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match report_type {
            ReportType::Orphans => ReportDto::Orphans(serde_json::from_value(value)?),
            ReportType::Inventory => ReportDto::Inventory(serde_json::from_value(value)?),
            ReportType::Staff => ReportDto::Staff(serde_json::from_value(value)?),
            ReportType::Fundraising => ReportDto::Fundraising(serde_json::from_value(value)?),
            ReportType::Volunteers => ReportDto::Volunteers(serde_json::from_value(value)?),
        })
    }

    pub fn report_type(&self) -> ReportType {
        match self {
            ReportDto::Orphans(_) => ReportType::Orphans,
            ReportDto::Inventory(_) => ReportType::Inventory,
            ReportDto::Staff(_) => ReportType::Staff,
            ReportDto::Fundraising(_) => ReportType::Fundraising,
            ReportDto::Volunteers(_) => ReportType::Volunteers,
        }
    }

    fn sample(report_type: ReportType) -> Self {
        match report_type {
            ReportType::Orphans => ReportDto::Orphans(OrphanReportDto {
                total_orphans: 120,
                new_admissions: 14,
                adopted: 9,
                average_age: 9.4,
                gender_distribution: vec![("MALE", 64.0), ("FEMALE", 56.0)].into(),
                age_distribution: vec![
                    ("0-2", 12.0),
                    ("3-5", 21.0),
                    ("6-12", 47.0),
                    ("13-17", 33.0),
                    ("18+", 7.0),
                ]
                .into(),
                education_levels: vec![
                    ("KINDERGARTEN", 18.0),
                    ("PRIMARY", 58.0),
                    ("SECONDARY", 31.0),
                    ("VOCATIONAL", 6.0),
                ]
                .into(),
                monthly_admissions: vec![
                    ("JANUARY", 3.0),
                    ("FEBRUARY", 2.0),
                    ("MARCH", 4.0),
                    ("APRIL", 1.0),
                    ("MAY", 2.0),
                    ("JUNE", 2.0),
                ]
                .into(),
            }),
            ReportType::Inventory => ReportDto::Inventory(InventoryReportDto {
                total_items: 86,
                low_stock_items: 7,
                out_of_stock_items: 2,
                total_value: 48_250.0,
                category_distribution: vec![
                    ("FOOD", 32.0),
                    ("CLOTHING", 18.0),
                    ("MEDICAL", 12.0),
                    ("EDUCATION", 15.0),
                    ("HYGIENE", 9.0),
                ]
                .into(),
                stock_status: vec![("IN_STOCK", 77.0), ("LOW_STOCK", 7.0), ("OUT_OF_STOCK", 2.0)].into(),
                monthly_consumption: vec![
                    ("JANUARY", 4_100.0),
                    ("FEBRUARY", 3_900.0),
                    ("MARCH", 4_350.0),
                    ("APRIL", 4_020.0),
                ]
                .into(),
            }),
            ReportType::Staff => ReportDto::Staff(StaffReportDto {
                total_staff: 34,
                active_staff: 31,
                suspended_staff: 3,
                role_distribution: vec![
                    ("SUPERVISOR", 5.0),
                    ("CAREGIVER", 18.0),
                    ("SOCIAL_WORKER", 6.0),
                    ("ACCOUNTANT", 2.0),
                ]
                .into(),
                gender_distribution: vec![("MALE", 13.0), ("FEMALE", 21.0)].into(),
                branch_distribution: vec![("Main Campus", 20.0), ("North Branch", 14.0)].into(),
            }),
            ReportType::Fundraising => ReportDto::Fundraising(FundraisingReportDto {
                total_raised: 182_400.0,
                total_goal: 250_000.0,
                active_campaigns: 4,
                completed_campaigns: 6,
                campaign_status: vec![("ACTIVE", 4.0), ("COMPLETED", 6.0), ("PENDING", 1.0)].into(),
                category_totals: vec![
                    ("EDUCATION", 72_000.0),
                    ("FOOD", 54_400.0),
                    ("MEDICAL", 56_000.0),
                ]
                .into(),
                monthly_donations: vec![
                    ("JANUARY", 21_000.0),
                    ("FEBRUARY", 26_500.0),
                    ("MARCH", 30_900.0),
                    ("APRIL", 28_000.0),
                ]
                .into(),
            }),
            ReportType::Volunteers => ReportDto::Volunteers(VolunteerReportDto {
                total_volunteers: 42,
                active_volunteers: 29,
                total_hours: 1_260.0,
                skill_distribution: vec![
                    ("TEACHING", 14.0),
                    ("HEALTHCARE", 6.0),
                    ("COUNSELING", 5.0),
                    ("COOKING", 9.0),
                    ("MAINTENANCE", 8.0),
                ]
                .into(),
                gender_distribution: vec![("MALE", 17.0), ("FEMALE", 25.0)].into(),
                monthly_hours: vec![
                    ("JANUARY", 280.0),
                    ("FEBRUARY", 310.0),
                    ("MARCH", 345.0),
                    ("APRIL", 325.0),
                ]
                .into(),
            }),
        }
    }
}

impl From<ReportDto> for ReportAnalytics {
    fn from(dto: ReportDto) -> Self {
        let report_type = dto.report_type();
        let (summary, charts) = match dto {
            ReportDto::Orphans(r) => (
                vec![
                    SummaryStat::new("Total orphans", SummaryValue::Count(r.total_orphans)),
                    SummaryStat::new("New admissions", SummaryValue::Count(r.new_admissions)),
                    SummaryStat::new("Adopted", SummaryValue::Count(r.adopted)),
                    SummaryStat::new("Average age", SummaryValue::Decimal(r.average_age)),
                ],
                vec![
                    ChartPanel::bar("Gender", &r.gender_distribution),
                    ChartPanel::bar("Age groups", &r.age_distribution),
                    ChartPanel::bar("Education level", &r.education_levels),
                    ChartPanel::line("Monthly admissions", &r.monthly_admissions),
                ],
            ),
            ReportDto::Inventory(r) => (
                vec![
                    SummaryStat::new("Total items", SummaryValue::Count(r.total_items)),
                    SummaryStat::new("Low stock", SummaryValue::Count(r.low_stock_items)),
                    SummaryStat::new("Out of stock", SummaryValue::Count(r.out_of_stock_items)),
                    SummaryStat::new("Stock value", SummaryValue::Amount(r.total_value)),
                ],
                vec![
                    ChartPanel::bar("Categories", &r.category_distribution),
                    ChartPanel::bar("Stock status", &r.stock_status),
                    ChartPanel::line("Monthly consumption", &r.monthly_consumption),
                ],
            ),
            ReportDto::Staff(r) => (
                vec![
                    SummaryStat::new("Total staff", SummaryValue::Count(r.total_staff)),
                    SummaryStat::new("Active", SummaryValue::Count(r.active_staff)),
                    SummaryStat::new("Suspended", SummaryValue::Count(r.suspended_staff)),
                ],
                vec![
                    ChartPanel::bar("Roles", &r.role_distribution),
                    ChartPanel::bar("Gender", &r.gender_distribution),
                    ChartPanel::bar("Branches", &r.branch_distribution),
                ],
            ),
            ReportDto::Fundraising(r) => (
                vec![
                    SummaryStat::new("Total raised", SummaryValue::Amount(r.total_raised)),
                    SummaryStat::new("Total goal", SummaryValue::Amount(r.total_goal)),
                    SummaryStat::new(
                        "Goal reached",
                        SummaryValue::Percent(percentage(r.total_raised, r.total_goal)),
                    ),
                    SummaryStat::new("Active campaigns", SummaryValue::Count(r.active_campaigns)),
                    SummaryStat::new("Completed campaigns", SummaryValue::Count(r.completed_campaigns)),
                ],
                vec![
                    ChartPanel::bar("Campaign status", &r.campaign_status),
                    ChartPanel::bar("Totals by category", &r.category_totals),
                    ChartPanel::line("Monthly donations", &r.monthly_donations),
                ],
            ),
            ReportDto::Volunteers(r) => (
                vec![
                    SummaryStat::new("Total volunteers", SummaryValue::Count(r.total_volunteers)),
                    SummaryStat::new("Active", SummaryValue::Count(r.active_volunteers)),
                    SummaryStat::new("Hours logged", SummaryValue::Decimal(r.total_hours)),
                ],
                vec![
                    ChartPanel::bar("Skills", &r.skill_distribution),
                    ChartPanel::bar("Gender", &r.gender_distribution),
                    ChartPanel::line("Monthly hours", &r.monthly_hours),
                ],
            ),
        };

        ReportAnalytics {
            report_type,
            summary,
            charts,
            source: DataSource::Live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_count_map_preserves_document_order() {
        let map: CountMap = serde_json::from_str(r#"{"MARCH": 3, "JANUARY": 1, "FEBRUARY": "2"}"#).unwrap();
        let keys: Vec<&str> = map.entries().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["MARCH", "JANUARY", "FEBRUARY"]);
        assert_eq!(map.entries()[2].1, 2.0);
    }

    #[test]
    fn test_count_map_tolerates_null_and_junk_values() {
        let map: CountMap = serde_json::from_str("null").unwrap();
        assert!(map.is_empty());
        let map: CountMap = serde_json::from_str(r#"{"A": null, "B": "n/a", "C": 4.5}"#).unwrap();
        assert_eq!(map.entries(), &[("A".to_string(), 0.0), ("B".to_string(), 0.0), ("C".to_string(), 4.5)]);
    }

    #[test]
    fn test_series_translates_and_clamps() {
        let map = CountMap::from(vec![("MALE", 10.0), ("MYSTERY", 2.0), ("FEMALE", -3.0)]);
        let series = series_from_map(&map);
        assert_eq!(
            series,
            vec![
                ChartPoint { name: "Male".into(), value: 10.0 },
                ChartPoint { name: "MYSTERY".into(), value: 2.0 },
                ChartPoint { name: "Female".into(), value: 0.0 },
            ]
        );
    }

    #[test]
    fn test_empty_payload_yields_empty_series() {
        for report_type in ReportType::ALL {
            let dto = ReportDto::from_value(report_type, json!({})).unwrap();
            let analytics = ReportAnalytics::from(dto);
            assert_eq!(analytics.report_type, report_type);
            assert_eq!(analytics.source, DataSource::Live);
            assert!(analytics.charts.iter().all(|c| c.series.is_empty()));
        }
    }

    #[test]
    fn test_orphan_report_transform() {
        let payload = json!({
            "totalOrphans": 57,
            "newAdmissions": 4,
            "adopted": 2,
            "averageAge": 8.25,
            "genderDistribution": {"MALE": 30, "FEMALE": 27},
            "ageDistribution": {"0-2": 5, "3-5": 10, "6-12": 25, "13-17": 17}
        });
        let analytics = ReportAnalytics::from(ReportDto::from_value(ReportType::Orphans, payload).unwrap());

        assert_eq!(analytics.summary[0].value, SummaryValue::Count(57));
        let ages = analytics.chart("Age groups").unwrap();
        assert_eq!(ages.series.len(), 4);
        assert_eq!(ages.series[0].name, "0-2 years");
        assert_eq!(ages.series[3].value, 17.0);
        assert!(analytics.chart("Monthly admissions").unwrap().series.is_empty());
    }

    #[test]
    fn test_monthly_keys_keep_backend_order() {
        let body = r#"{"monthlyDonations":{"JANUARY":1,"FEBRUARY":2,"MARCH":3,"APRIL":4}}"#;
        let names = |dto: ReportDto| {
            ReportAnalytics::from(dto)
                .charts
                .iter()
                .flat_map(|c| c.series.iter().map(|p| p.name.clone()))
                .collect::<Vec<_>>()
        };

        let from_text = names(ReportDto::from_json(ReportType::Fundraising, body).unwrap());
        assert_eq!(from_text, vec!["Jan", "Feb", "Mar", "Apr"]);

        let value: serde_json::Value = serde_json::from_str(body).unwrap();
        let from_value = names(ReportDto::from_value(ReportType::Fundraising, value).unwrap());
        assert_eq!(from_value, from_text);
    }

    #[test]
    fn test_fundraising_goal_percentage() {
        let payload = json!({"totalRaised": 750.0, "totalGoal": 1000.0});
        let analytics = ReportAnalytics::from(ReportDto::from_value(ReportType::Fundraising, payload).unwrap());
        let reached = analytics.summary.iter().find(|s| s.label == "Goal reached").unwrap();
        assert_eq!(reached.value, SummaryValue::Percent(75.0));
        assert_eq!(reached.value.to_string(), "75.0%");
    }

    #[test]
    fn test_wrong_scalar_type_is_an_error() {
        let payload = json!({"totalStaff": "many"});
        assert!(ReportDto::from_value(ReportType::Staff, payload).is_err());
    }

    #[test]
    fn test_sample_is_marked() {
        for report_type in ReportType::ALL {
            let sample = ReportAnalytics::sample(report_type);
            assert!(sample.is_sample());
            assert_eq!(sample.report_type, report_type);
            assert!(sample.charts.iter().any(|c| !c.series.is_empty()));
            assert!(sample
                .charts
                .iter()
                .flat_map(|c| c.series.iter())
                .all(|p| p.value >= 0.0));
        }
    }

    #[test]
    fn test_report_format_file_name() {
        assert_eq!(ReportFormat::Excel.file_name(ReportType::Inventory), "inventory-report.xlsx");
        assert_eq!(ReportFormat::Pdf.query_value(), "PDF");
    }
}
