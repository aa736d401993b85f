//! GEXF 1.2 export for graph visualisation tools such as Gephi.

use crate::{errors::GraphError, graph::WeightedGraph};
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

const GEXF_NAMESPACE: &str = "http://www.gexf.net/1.2draft";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    Integer,
    Double,
    String,
}

impl AttrType {
    fn as_str(&self) -> &'static str {
        match self {
            AttrType::Integer => "integer",
            AttrType::Double => "double",
            AttrType::String => "string",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NodeAttribute {
    title: String,
    kind: AttrType,
    values: Vec<String>,
}

/// Serialises a [`WeightedGraph`] as GEXF. Every edge carries its weight; extra
/// per-node attributes can be attached with [`GexfExport::with_node_attribute`].
///
/// # Example
///
/// ```
/// use subflow::{graph::WeightedGraph, io::gexf::{AttrType, GexfExport}};
///
/// let mut g = WeightedGraph::undirected();
/// g.add_edge("rust", "learnrust", 3.0);
/// let mut out = Vec::new();
/// GexfExport::new(&g)
///     .with_node_attribute("users", AttrType::Integer, vec!["10".into(), "4".into()])
///     .write(&mut out)
///     .unwrap();
/// assert!(String::from_utf8(out).unwrap().contains(r#"weight="3""#));
/// ```
#[derive(Debug, Clone)]
pub struct GexfExport<'a> {
    graph: &'a WeightedGraph,
    attributes: Vec<NodeAttribute>,
}

impl<'a> GexfExport<'a> {
    pub fn new(graph: &'a WeightedGraph) -> Self {
        Self {
            graph,
            attributes: Vec::new(),
        }
    }

    /// Adds a node attribute column. `values` is indexed by node id; missing entries are
    /// left out of the output.
    pub fn with_node_attribute(mut self, title: &str, kind: AttrType, values: Vec<String>) -> Self {
        self.attributes.push(NodeAttribute {
            title: title.to_owned(),
            kind,
            values,
        });
        self
    }

    pub fn save(&self, path: &Path) -> Result<(), GraphError> {
        let mut file = BufWriter::new(File::create(path)?);
        self.write(&mut file)?;
        file.flush()?;
        Ok(())
    }

    pub fn write<W: Write>(&self, inner: W) -> Result<(), GraphError> {
        let g = self.graph;
        let mut writer = Writer::new_with_indent(inner, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("gexf");
        root.push_attribute(("xmlns", GEXF_NAMESPACE));
        root.push_attribute(("version", "1.2"));
        writer.write_event(Event::Start(root))?;

        writer.write_event(Event::Start(BytesStart::new("meta")))?;
        writer.write_event(Event::Start(BytesStart::new("creator")))?;
        writer.write_event(Event::Text(BytesText::new(concat!(
            "subflow ",
            env!("CARGO_PKG_VERSION")
        ))))?;
        writer.write_event(Event::End(BytesEnd::new("creator")))?;
        writer.write_event(Event::End(BytesEnd::new("meta")))?;

        let mut graph = BytesStart::new("graph");
        let edge_type = if g.is_directed() {
            "directed"
        } else {
            "undirected"
        };
        graph.push_attribute(("defaultedgetype", edge_type));
        graph.push_attribute(("mode", "static"));
        writer.write_event(Event::Start(graph))?;

        if !self.attributes.is_empty() {
            let mut attributes = BytesStart::new("attributes");
            attributes.push_attribute(("class", "node"));
            attributes.push_attribute(("mode", "static"));
            writer.write_event(Event::Start(attributes))?;
            for (id, attr) in self.attributes.iter().enumerate() {
                let mut decl = BytesStart::new("attribute");
                decl.push_attribute(("id", id.to_string().as_str()));
                decl.push_attribute(("title", attr.title.as_str()));
                decl.push_attribute(("type", attr.kind.as_str()));
                writer.write_event(Event::Empty(decl))?;
            }
            writer.write_event(Event::End(BytesEnd::new("attributes")))?;
        }

        writer.write_event(Event::Start(BytesStart::new("nodes")))?;
        for v in g.nodes() {
            let name = g.name(v);
            let mut node = BytesStart::new("node");
            node.push_attribute(("id", name));
            node.push_attribute(("label", name));

            let values: Vec<(usize, &str)> = self
                .attributes
                .iter()
                .enumerate()
                .filter_map(|(id, attr)| attr.values.get(v.index()).map(|val| (id, val.as_str())))
                .collect();
            if values.is_empty() {
                writer.write_event(Event::Empty(node))?;
                continue;
            }
            writer.write_event(Event::Start(node))?;
            writer.write_event(Event::Start(BytesStart::new("attvalues")))?;
            for (id, value) in values {
                let mut attvalue = BytesStart::new("attvalue");
                attvalue.push_attribute(("for", id.to_string().as_str()));
                attvalue.push_attribute(("value", value));
                writer.write_event(Event::Empty(attvalue))?;
            }
            writer.write_event(Event::End(BytesEnd::new("attvalues")))?;
            writer.write_event(Event::End(BytesEnd::new("node")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("nodes")))?;

        writer.write_event(Event::Start(BytesStart::new("edges")))?;
        for (id, (src, dst, weight)) in g.edges().enumerate() {
            let mut edge = BytesStart::new("edge");
            edge.push_attribute(("id", id.to_string().as_str()));
            edge.push_attribute(("source", g.name(src)));
            edge.push_attribute(("target", g.name(dst)));
            edge.push_attribute(("weight", weight.to_string().as_str()));
            writer.write_event(Event::Empty(edge))?;
        }
        writer.write_event(Event::End(BytesEnd::new("edges")))?;

        writer.write_event(Event::End(BytesEnd::new("graph")))?;
        writer.write_event(Event::End(BytesEnd::new("gexf")))?;
        Ok(())
    }
}

#[cfg(test)]
mod gexf_test {
    use super::{AttrType, GexfExport};
    use crate::graph::WeightedGraph;

    fn render(export: GexfExport) -> String {
        let mut out = Vec::new();
        export.write(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn undirected_graph_with_attributes() {
        let mut g = WeightedGraph::undirected();
        g.add_edge("A", "B", 2.0);
        g.add_node("C");
        let xml = render(GexfExport::new(&g).with_node_attribute(
            "users",
            AttrType::Integer,
            vec!["3".into(), "2".into(), "1".into()],
        ));

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<graph defaultedgetype="undirected" mode="static">"#));
        assert!(xml.contains(r#"<attribute id="0" title="users" type="integer"/>"#));
        assert!(xml.contains(r#"<node id="C" label="C">"#));
        assert!(xml.contains(r#"<attvalue for="0" value="1"/>"#));
        assert!(xml.contains(r#"<edge id="0" source="A" target="B" weight="2"/>"#));
        assert_eq!(xml.matches("<edge ").count(), 1);
    }

    #[test]
    fn directed_graph_and_escaping() {
        let mut g = WeightedGraph::directed();
        g.add_edge("a&b", "c", 1.0);
        g.add_edge("c", "a&b", 4.0);
        let xml = render(GexfExport::new(&g));

        assert!(xml.contains(r#"defaultedgetype="directed""#));
        assert!(xml.contains(r#"<node id="a&amp;b" label="a&amp;b"/>"#));
        assert!(xml.contains(r#"source="c" target="a&amp;b" weight="4""#));
        assert!(!xml.contains("<attributes"));
    }
}
