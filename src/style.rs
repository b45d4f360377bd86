//! Style and label rules for operator, channel and output nodes and for edges.
//!
//! Pure lookups: every node style comes from a named [`StylePreset`].

use crate::config::{Algorithm, OperatorConfig, OutputConfig};
use crate::graph::EdgeKind;

pub const HEADER_FONT: &str = "#3580A4";
pub const HEADER_BACKGROUND: &str = "#F1F2F3";
pub const ACTIVE_ALGORITHM: &str = "#275D16";
pub const BYPASSED_ALGORITHM: &str = "#757575";
pub const LATEST_EDGE: &str = "#FF5050";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Record,
    Octagon,
}

impl Shape {
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Record => "record",
            Shape::Octagon => "octagon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Border {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeStyle {
    pub shape: Shape,
    pub fill: &'static str,
    pub border: Border,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePreset {
    OperatorDefault,
    OperatorBypass,
    Channel,
    /// Output carrying exactly one descriptor field.
    OutputSingle,
    /// Output carrying several descriptor fields.
    OutputMulti,
    /// Output identified only by its frequency.
    OutputFrequency,
}

impl StylePreset {
    pub const fn node_style(self) -> NodeStyle {
        match self {
            StylePreset::OperatorDefault => NodeStyle {
                shape: Shape::Record,
                fill: "#AECA42",
                border: Border::Solid,
            },
            StylePreset::OperatorBypass => NodeStyle {
                shape: Shape::Record,
                fill: "#6495ED",
                border: Border::Dashed,
            },
            StylePreset::Channel | StylePreset::OutputSingle => NodeStyle {
                shape: Shape::Octagon,
                fill: "#E0E0E0",
                border: Border::Solid,
            },
            StylePreset::OutputMulti => NodeStyle {
                shape: Shape::Octagon,
                fill: "#CC33FF",
                border: Border::Solid,
            },
            StylePreset::OutputFrequency => NodeStyle {
                shape: Shape::Octagon,
                fill: "#FF9900",
                border: Border::Solid,
            },
        }
    }

    pub fn for_operator(bypass: bool) -> Self {
        if bypass {
            StylePreset::OperatorBypass
        } else {
            StylePreset::OperatorDefault
        }
    }

    /// Event-keyed outputs are colored by how many descriptor fields they carry.
    pub fn for_event_output(descriptor_count: usize) -> Self {
        if descriptor_count == 1 {
            StylePreset::OutputSingle
        } else {
            StylePreset::OutputMulti
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeLine {
    Solid,
    Dashed,
}

impl EdgeLine {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeLine::Solid => "solid",
            EdgeLine::Dashed => "dashed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeStyle {
    pub line: EdgeLine,
    pub color: Option<&'static str>,
}

pub fn edge_style(kind: EdgeKind) -> EdgeStyle {
    match kind {
        EdgeKind::Trigger | EdgeKind::Output => EdgeStyle {
            line: EdgeLine::Solid,
            color: None,
        },
        EdgeKind::Input { .. } => EdgeStyle {
            line: EdgeLine::Dashed,
            color: None,
        },
        EdgeKind::Latest => EdgeStyle {
            line: EdgeLine::Dashed,
            color: Some(LATEST_EDGE),
        },
    }
}

pub fn edge_label(kind: EdgeKind) -> String {
    match kind {
        EdgeKind::Trigger => "trigger".to_string(),
        EdgeKind::Input { offset } => format!("offset\n{offset}"),
        EdgeKind::Latest => "latest".to_string(),
        EdgeKind::Output => "output".to_string(),
    }
}

/// One cell of a table label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelRow {
    pub text: String,
    pub color: &'static str,
    pub background: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// Plain text, one entry per line.
    Text(Vec<String>),
    /// Single-column table, rendered as an HTML-like label.
    Table(Vec<LabelRow>),
}

impl Label {
    pub fn plain(text: impl Into<String>) -> Self {
        Label::Text(vec![text.into()])
    }
}

/// Header row with the operator name, then one row per algorithm.
pub fn operator_label(op: &OperatorConfig) -> Label {
    let mut rows = vec![LabelRow {
        text: op.name.clone(),
        color: HEADER_FONT,
        background: Some(HEADER_BACKGROUND),
    }];

    let algorithm_row = |algorithm: &str, bypass: bool| LabelRow {
        text: format!("* {algorithm}"),
        color: if bypass {
            BYPASSED_ALGORITHM
        } else {
            ACTIVE_ALGORITHM
        },
        background: None,
    };

    match op.algorithm() {
        Algorithm::Single(algorithm) => rows.push(algorithm_row(algorithm, false)),
        Algorithm::Group(members) => rows.extend(
            members
                .iter()
                .map(|m| algorithm_row(&m.algorithm, m.bypass)),
        ),
        Algorithm::Unset => {}
    }

    Label::Table(rows)
}

/// Label for an output node plus the number of descriptor fields it shows.
pub fn output_label(output: &OutputConfig) -> (Label, usize) {
    let lines = output.descriptors();
    let count = lines.len();
    (Label::Text(lines), count)
}
