//! DOT text generation.

use std::fmt::Write;

use super::RankDir;
use crate::graph::{AbstractGraph, NodeId};
use crate::style::{Border, Label, LabelRow};

const TABLE_ATTRS: &str = r#"border="0" cellborder="1" cellspacing="0" cellpadding="4""#;

/// Escape special characters for quoted DOT strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Escape text placed inside an HTML-like label.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// DOT id for a node: registry position, so it never depends on user text.
pub fn node_id(id: NodeId) -> String {
    format!("n{}", id.index())
}

/// Render a label as a DOT attribute value (quoted or `<...>`).
pub fn label_value(label: &Label) -> String {
    match label {
        Label::Text(lines) => format!("\"{}\"", escape_label(&lines.join("\n"))),
        Label::Table(rows) => {
            let rows: Vec<String> = rows.iter().map(table_row).collect();
            format!("<<table {TABLE_ATTRS}>{}</table>>", rows.join(""))
        }
    }
}

fn table_row(row: &LabelRow) -> String {
    let cell = match row.background {
        Some(bg) => format!(r#"<td bgcolor="{bg}">"#),
        None => "<td>".to_string(),
    };
    format!(
        r#"<tr>{cell}<font color="{}">{}</font></td></tr>"#,
        row.color,
        escape_html(&row.text)
    )
}

/// Minimal DOT writer: attributes are passed pre-rendered.
pub struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {name} {{");
        Self { output, indent: 1 }
    }

    /// Add a graph attribute.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape_label(value));
        self
    }

    /// `attrs` values must already be valid DOT (quoted or HTML-like).
    pub fn node(&mut self, id: &str, attrs: &[(&str, String)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{id} [");
        self.write_attrs(attrs);
        self.output.push_str("];\n");
        self
    }

    pub fn edge(&mut self, from: &str, to: &str, attrs: &[(&str, String)]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{from} -> {to} [");
        self.write_attrs(attrs);
        self.output.push_str("];\n");
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }

    fn write_attrs(&mut self, attrs: &[(&str, String)]) {
        for (i, (key, value)) in attrs.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            let _ = write!(self.output, "{key}={value}");
        }
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", escape_label(value))
}

/// Render the whole graph: nodes in registry order, then edges in build order.
pub fn to_dot(graph: &AbstractGraph, rankdir: RankDir) -> String {
    let mut dot = DotBuilder::new("DagNet");
    dot.attr("rankdir", rankdir.as_str());
    dot.blank();

    for (id, node) in graph.nodes() {
        let style = node.style();
        let border = match style.border {
            Border::Solid => "filled",
            Border::Dashed => "filled,dashed",
        };
        dot.node(
            &node_id(id),
            &[
                ("label", label_value(&node.label)),
                ("shape", quoted(style.shape.as_str())),
                ("style", quoted(border)),
                ("fillcolor", quoted(style.fill)),
            ],
        );
    }

    if !graph.edges().is_empty() {
        dot.blank();
    }

    for edge in graph.edges() {
        let mut attrs = vec![
            ("label", quoted(&edge.label)),
            ("style", quoted(edge.style.line.as_str())),
        ];
        if let Some(color) = edge.style.color {
            attrs.push(("color", quoted(color)));
            attrs.push(("fontcolor", quoted(color)));
        }
        dot.edge(&node_id(edge.from), &node_id(edge.to), &attrs);
    }

    dot.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::graph::build;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_quotes_and_newlines() {
        assert_eq!(escape_label("a \"b\"\nc"), "a \\\"b\\\"\\nc");
        assert_eq!(escape_html("<a & b>"), "&lt;a &amp; b&gt;");
    }

    #[test]
    fn text_label_joins_lines() {
        let label = Label::Text(vec!["event: y".to_string(), "hz: 10".to_string()]);
        assert_eq!(label_value(&label), "\"event: y\\nhz: 10\"");
    }

    #[test]
    fn full_graph_output() {
        let config = parse_config(
            r#"{ "op": [{ "name": "A", "algorithm": "alg1", "input": ["x"],
                          "latest": ["p"], "output": [{ "event": "y" }] }] }"#,
        )
        .unwrap();
        let graph = build(&config).unwrap();

        let expected = concat!(
            "digraph DagNet {\n",
            "  rankdir=\"LR\";\n",
            "\n",
            "  n0 [label=<<table border=\"0\" cellborder=\"1\" cellspacing=\"0\" cellpadding=\"4\">",
            "<tr><td bgcolor=\"#F1F2F3\"><font color=\"#3580A4\">A</font></td></tr>",
            "<tr><td><font color=\"#275D16\">* alg1</font></td></tr></table>>, ",
            "shape=\"record\", style=\"filled\", fillcolor=\"#AECA42\"];\n",
            "  n1 [label=\"x\", shape=\"octagon\", style=\"filled\", fillcolor=\"#E0E0E0\"];\n",
            "  n2 [label=\"p\", shape=\"octagon\", style=\"filled\", fillcolor=\"#E0E0E0\"];\n",
            "  n3 [label=\"event: y\", shape=\"octagon\", style=\"filled\", fillcolor=\"#E0E0E0\"];\n",
            "\n",
            "  n1 -> n0 [label=\"offset\\n0\", style=\"dashed\"];\n",
            "  n2 -> n0 [label=\"latest\", style=\"dashed\", color=\"#FF5050\", fontcolor=\"#FF5050\"];\n",
            "  n0 -> n3 [label=\"output\", style=\"solid\"];\n",
            "}\n",
        );
        assert_eq!(to_dot(&graph, RankDir::LeftRight), expected);
    }

    #[test]
    fn bypassed_operator_is_dashed() {
        let config =
            parse_config(r#"{ "op": [{ "name": "A", "algorithm": "a", "bypass": true }] }"#).unwrap();
        let dot = to_dot(&build(&config).unwrap(), RankDir::TopBottom);
        assert!(dot.contains("style=\"filled,dashed\", fillcolor=\"#6495ED\""));
    }

    #[test]
    fn operator_names_are_html_escaped() {
        let config = parse_config(r#"{ "op": [{ "name": "a<b>", "algorithm": "x&y" }] }"#).unwrap();
        let dot = to_dot(&build(&config).unwrap(), RankDir::TopBottom);
        assert!(dot.contains("a&lt;b&gt;"));
        assert!(dot.contains("* x&amp;y"));
    }
}
