use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::Serialize;

use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the worker table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
/// Frequency tables sort and hash these, so `CellValue` must be `Ord` + `Hash`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in ordered and hashed sets --
// Equality follows `Ord` (floats by `total_cmp`) so it agrees with `Hash`:
// NaN equals NaN, 0.0 and -0.0 are distinct keys.

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for plotting.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Guess the type of a raw text cell the way a dataframe reader would.
    pub fn infer(s: &str) -> CellValue {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        match s {
            "true" | "True" => CellValue::Bool(true),
            "false" | "False" => CellValue::Bool(false),
            _ => CellValue::String(s.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – the required schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Categorical,
    Integer,
    Float,
}

/// Columns every worker table must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    IndustrySector,
    LocationType,
    Age,
    ExperienceYears,
    CalendarScheduledUsage,
    FocusTimeMinutes,
    TaskCompletionRate,
    ProductivityScore,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::IndustrySector,
        Column::LocationType,
        Column::Age,
        Column::ExperienceYears,
        Column::CalendarScheduledUsage,
        Column::FocusTimeMinutes,
        Column::TaskCompletionRate,
        Column::ProductivityScore,
    ];

    /// Header name in the source file.
    pub fn name(self) -> &'static str {
        match self {
            Column::IndustrySector => "industry_sector",
            Column::LocationType => "location_type",
            Column::Age => "age",
            Column::ExperienceYears => "experience_years",
            Column::CalendarScheduledUsage => "calendar_scheduled_usage",
            Column::FocusTimeMinutes => "focus_time_minutes",
            Column::TaskCompletionRate => "task_completion_rate",
            Column::ProductivityScore => "productivity_score",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::IndustrySector | Column::LocationType => ColumnKind::Categorical,
            Column::Age | Column::ExperienceYears => ColumnKind::Integer,
            _ => ColumnKind::Float,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.kind() != ColumnKind::Categorical
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| DashboardError::UnknownColumn(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// WorkerRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single remote worker (one row of the source file).
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerRecord {
    pub industry_sector: String,
    pub location_type: String,
    pub age: i64,
    pub experience_years: i64,
    pub calendar_scheduled_usage: f64,
    pub focus_time_minutes: f64,
    pub task_completion_rate: f64,
    pub productivity_score: f64,
    /// Columns outside the required schema: column_name → value.
    pub extra: BTreeMap<String, CellValue>,
}

impl WorkerRecord {
    /// Value of a required column.
    pub fn value(&self, column: Column) -> CellValue {
        match column {
            Column::IndustrySector => CellValue::String(self.industry_sector.clone()),
            Column::LocationType => CellValue::String(self.location_type.clone()),
            Column::Age => CellValue::Integer(self.age),
            Column::ExperienceYears => CellValue::Integer(self.experience_years),
            Column::CalendarScheduledUsage => CellValue::Float(self.calendar_scheduled_usage),
            Column::FocusTimeMinutes => CellValue::Float(self.focus_time_minutes),
            Column::TaskCompletionRate => CellValue::Float(self.task_completion_rate),
            Column::ProductivityScore => CellValue::Float(self.productivity_score),
        }
    }

    /// Value of a numeric required column, `None` for categorical ones.
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::IndustrySector | Column::LocationType => None,
            Column::Age => Some(self.age as f64),
            Column::ExperienceYears => Some(self.experience_years as f64),
            Column::CalendarScheduledUsage => Some(self.calendar_scheduled_usage),
            Column::FocusTimeMinutes => Some(self.focus_time_minutes),
            Column::TaskCompletionRate => Some(self.task_completion_rate),
            Column::ProductivityScore => Some(self.productivity_score),
        }
    }

    /// Look a cell up by header name, required or extra.
    pub fn cell(&self, header: &str) -> CellValue {
        match header.parse::<Column>() {
            Ok(col) => self.value(col),
            Err(_) => self.extra.get(header).cloned().unwrap_or(CellValue::Null),
        }
    }
}

// ---------------------------------------------------------------------------
// WorkerTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerTable {
    /// All workers (rows), in file order.
    pub records: Vec<WorkerRecord>,
    /// Column names in file order, required and extra.
    pub headers: Vec<String>,
}

impl WorkerTable {
    pub fn new(records: Vec<WorkerRecord>, headers: Vec<String>) -> Self {
        WorkerTable { records, headers }
    }

    /// Distinct values of `column`, in the order they first appear.
    pub fn distinct_values(&self, column: Column) -> Vec<CellValue> {
        let set: IndexSet<CellValue> = self.records.iter().map(|r| r.value(column)).collect();
        set.into_iter().collect()
    }

    /// Distinct industry sectors, the options of the filter control.
    pub fn industry_sectors(&self) -> Vec<String> {
        let set: IndexSet<&str> = self
            .records
            .iter()
            .map(|r| r.industry_sector.as_str())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Number of workers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn worker(sector: &str, location: &str, age: i64, experience: i64) -> WorkerRecord {
        WorkerRecord {
            industry_sector: sector.to_string(),
            location_type: location.to_string(),
            age,
            experience_years: experience,
            calendar_scheduled_usage: age as f64 / 10.0,
            focus_time_minutes: 60.0 + experience as f64,
            task_completion_rate: 0.5,
            productivity_score: 40.0 + age as f64,
            extra: BTreeMap::new(),
        }
    }

    /// Table whose headers are just the required schema.
    pub fn table(rows: Vec<WorkerRecord>) -> WorkerTable {
        let headers = Column::ALL.iter().map(|c| c.name().to_string()).collect();
        WorkerTable::new(rows, headers)
    }

    /// Ten workers: 4 in IT, 6 in Retail.
    pub fn ten_workers() -> WorkerTable {
        let rows = vec![
            worker("IT", "City", 42, 17),
            worker("Retail", "Town", 17, 2),
            worker("Retail", "Village", 42, 10),
            worker("IT", "City", 30, 5),
            worker("Retail", "City", 25, 3),
            worker("Retail", "Town", 51, 20),
            worker("IT", "Village", 42, 17),
            worker("Retail", "Village", 38, 12),
            worker("IT", "Town", 29, 4),
            worker("Retail", "City", 60, 30),
        ];
        table(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_cell_value_ordering() {
        assert!(CellValue::Null < CellValue::Bool(false));
        assert!(CellValue::Integer(17) < CellValue::Integer(42));
        assert!(CellValue::Float(-1.0) < CellValue::Float(0.5));
        assert!(CellValue::Integer(1000) < CellValue::Float(0.0));
        assert!(CellValue::String("a".into()) < CellValue::String("b".into()));
    }

    #[test]
    fn test_float_equality_matches_hash() {
        use std::collections::HashSet;

        let nan = CellValue::Float(f64::NAN);
        assert_eq!(nan, CellValue::Float(f64::NAN));
        assert_ne!(CellValue::Float(0.0), CellValue::Float(-0.0));

        let set: HashSet<CellValue> = [
            CellValue::Float(f64::NAN),
            CellValue::Float(f64::NAN),
            CellValue::Float(0.0),
            CellValue::Float(-0.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_infer() {
        assert_eq!(CellValue::infer(""), CellValue::Null);
        assert_eq!(CellValue::infer("42"), CellValue::Integer(42));
        assert_eq!(CellValue::infer("0.75"), CellValue::Float(0.75));
        assert_eq!(CellValue::infer("True"), CellValue::Bool(true));
        assert_eq!(CellValue::infer("Remote"), CellValue::String("Remote".into()));
    }

    #[test]
    fn test_column_round_trip_names() {
        for col in Column::ALL {
            assert_eq!(col.name().parse::<Column>().unwrap(), col);
        }
        assert!(matches!(
            "salary".parse::<Column>(),
            Err(DashboardError::UnknownColumn(name)) if name == "salary"
        ));
    }

    #[test]
    fn test_industry_sectors_discovery_order() {
        let table = ten_workers();
        assert_eq!(table.industry_sectors(), vec!["IT", "Retail"]);
        assert_eq!(
            table.distinct_values(Column::LocationType),
            vec![
                CellValue::String("City".into()),
                CellValue::String("Town".into()),
                CellValue::String("Village".into()),
            ]
        );
    }

    #[test]
    fn test_cell_by_header() {
        let mut rec = worker("IT", "City", 42, 17);
        rec.extra.insert("uses_ai_planner".into(), CellValue::Bool(true));
        assert_eq!(rec.cell("age"), CellValue::Integer(42));
        assert_eq!(rec.cell("uses_ai_planner"), CellValue::Bool(true));
        assert_eq!(rec.cell("missing"), CellValue::Null);
        assert_eq!(rec.number(Column::LocationType), None);
        assert_eq!(rec.number(Column::ExperienceYears), Some(17.0));
    }
}
