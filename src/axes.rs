//! Static axis tables: which number (and which name) sits behind each row and
//! column of the scenario grid, plus how each scenario is drawn.

use plotters::style::RGBColor;

/// One point on a scenario axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPoint {
    /// Identifier used in lookups, e.g. `"SSP1"` or `"8.5"`.
    pub id: &'static str,
    /// Label as it appears in the input/spreadsheet, e.g. `"8.5 W m-2"`.
    pub column: &'static str,
    /// Scenario name used by the scenario-labelled plot, e.g. `"RCP8.5"`.
    pub scenario: &'static str,
    pub value: f64,
}

/// Fixed, ordered mapping from identifier to a numeric axis value.
#[derive(Debug, Clone, Copy)]
pub struct Axis {
    pub unit: &'static str,
    points: &'static [AxisPoint],
}

impl Axis {
    pub fn points(&self) -> &'static [AxisPoint] {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Accepts the short id, the column label or the scenario name.
    pub fn lookup(&self, key: &str) -> Option<f64> {
        let key = key.trim();
        self.points
            .iter()
            .find(|p| p.id == key || p.column == key || p.scenario == key)
            .map(|p| p.value)
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn scenario_names(&self) -> Vec<&'static str> {
        self.points.iter().map(|p| p.scenario).collect()
    }
}

/// Baseline economic growth (%/yr) for SSP1..SSP5, in row order.
pub static SCENARIO_AXIS: Axis = Axis {
    unit: "%/yr",
    points: &[
        AxisPoint { id: "SSP1", column: "SSP1", scenario: "SSP1", value: 2.00 },
        AxisPoint { id: "SSP2", column: "SSP2", scenario: "SSP2", value: 1.62 },
        AxisPoint { id: "SSP3", column: "SSP3", scenario: "SSP3", value: 0.34 },
        AxisPoint { id: "SSP4", column: "SSP4", scenario: "SSP4", value: 1.15 },
        AxisPoint { id: "SSP5", column: "SSP5", scenario: "SSP5", value: 2.73 },
    ],
};

/// Projected warming (°C/century) per forcing level, in column order.
pub static WARMING_AXIS: Axis = Axis {
    unit: "°C/century",
    points: &[
        AxisPoint { id: "2.6", column: "2.6 W m-2", scenario: "RCP2.6", value: 0.87 },
        AxisPoint { id: "4.5", column: "4.5 W m-2", scenario: "RCP4.5", value: 2.27 },
        AxisPoint { id: "7.0", column: "7.0 W m-2", scenario: "RCP7.0", value: 3.96 },
        AxisPoint { id: "8.5", column: "8.5 W m-2", scenario: "RCP8.5", value: 5.10 },
    ],
};

/// tab10 palette, one colour per SSP.
pub const SSP_COLORS: [RGBColor; 5] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
    Diamond,
}

/// One marker shape per warming level.
pub const WARMING_MARKERS: [Marker; 4] = [
    Marker::Circle,
    Marker::Square,
    Marker::Triangle,
    Marker::Diamond,
];
