use std::fmt;

/// Row labels of every table, in array order.
pub const SCENARIO_LABELS: [&str; 6] = ["No growth", "SSP1", "SSP2", "SSP3", "SSP4", "SSP5"];

/// Column labels of every table, in array order.
pub const WARMING_LABELS: [&str; 5] = [
    "No warming",
    "2.6 W m-2",
    "4.5 W m-2",
    "7.0 W m-2",
    "8.5 W m-2",
];

/// Partition of the dataset; one table per group in the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IncomeGroup {
    AllCountry,
    High,
    Middle,
    Low,
}

impl IncomeGroup {
    /// All groups in file/array order.
    pub const ALL: [IncomeGroup; 4] = [
        IncomeGroup::AllCountry,
        IncomeGroup::High,
        IncomeGroup::Middle,
        IncomeGroup::Low,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Table heading as written in the input file.
    pub fn heading(self) -> &'static str {
        match self {
            IncomeGroup::AllCountry => "All-country average",
            IncomeGroup::High => "High-income group",
            IncomeGroup::Middle => "Middle-income group",
            IncomeGroup::Low => "Low-income group",
        }
    }

    /// Panel caption used by the plots.
    pub fn countries_label(self) -> &'static str {
        match self {
            IncomeGroup::AllCountry => "All countries",
            IncomeGroup::High => "High-income countries",
            IncomeGroup::Middle => "Middle-income countries",
            IncomeGroup::Low => "Low-income countries",
        }
    }

    pub fn from_heading(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|g| g.heading() == s)
    }
}

impl fmt::Display for IncomeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// Row index of a scenario label (`"No growth"`, `"SSP1"`, ...).
pub fn scenario_index(label: &str) -> Option<usize> {
    SCENARIO_LABELS.iter().position(|l| *l == label.trim())
}
