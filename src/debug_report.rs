use amrgraph::{Diagnostic, Edge, Endpoint, Node, ParseResultVerbose};

/// Roles in the report, each mapped to one SGR sequence.
#[derive(Clone, Copy)]
enum Style {
    Title,
    Banner,
    Position,
    Handle,
    Concept,
    Relation,
    Count,
    Muted,
}

impl Style {
    fn sgr(self) -> &'static str {
        match self {
            Style::Title => "\x1b[1;36m",
            Style::Banner => "\x1b[90m",
            Style::Position | Style::Count => "\x1b[33m",
            Style::Handle => "\x1b[34m",
            Style::Concept => "\x1b[1;32m",
            Style::Relation => "\x1b[36m",
            Style::Muted => "\x1b[2m",
        }
    }
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint(&self, s: impl AsRef<str>, style: Style) -> String {
        if self.enabled { format!("{}{}\x1b[0m", style.sgr(), s.as_ref()) } else { s.as_ref().to_string() }
    }

    fn muted(&self, s: impl AsRef<str>) -> String {
        self.paint(s, Style::Muted)
    }

    fn node(&self, node: &Node) -> String {
        if !self.enabled {
            return node.to_string();
        }
        format!(
            "{} {} {}",
            self.paint(node.position.to_string(), Style::Position),
            self.paint(&node.handle, Style::Handle),
            self.paint(&node.concept, Style::Concept),
        )
    }
}

pub fn print_run(res: &ParseResultVerbose, color: bool, timings: bool) {
    let palette = Palette { enabled: color };
    let graph = &res.graph;
    let preview: String = res.text.split_whitespace().collect::<Vec<_>>().join(" ").chars().take(72).collect();
    println!("\n{}", palette.paint(format!("⚙  Parsing: \"{}\"", preview), Style::Title));

    println!("\n{}", palette.paint(format!("━━━ Nodes ({}) ━━━", graph.nodes().len()), Style::Banner));
    if graph.nodes().is_empty() {
        println!("{}", palette.muted("  No nodes"));
    }
    for node in graph.nodes() {
        let indent = "  ".repeat(node.position.depth());
        println!("  {}{}", indent, palette.node(node));
    }

    println!("\n{}", palette.paint(format!("━━━ Edges ({}) ━━━", graph.edges().len()), Style::Banner));
    if graph.edges().is_empty() {
        println!("{}", palette.muted("  No edges"));
    }
    for edge in graph.edges() {
        println!("  {}", fmt_edge(edge, &palette));
    }

    if !graph.diagnostics().is_empty() {
        println!("\n{}", palette.paint("━━━ Diagnostics ━━━", Style::Banner));
        for diag in graph.diagnostics() {
            println!("  {}", fmt_diagnostic(diag, &palette));
        }
    }

    if timings {
        let t = &res.timings;
        println!("\n{}", palette.paint("━━━ Timing ━━━", Style::Banner));
        println!(
            "  Total: {}  │  Read: {}  │  Index: {}  │  Edges: {}  │  Enrich: {}",
            palette.paint(format!("{:?}", t.total), Style::Count),
            palette.paint(format!("{:?}", t.read), Style::Relation),
            palette.muted(format!("{:?}", t.index)),
            palette.muted(format!("{:?}", t.edges)),
            palette.muted(format!("{:?}", t.enrich)),
        );
        println!(
            "  {} {}  {} {}",
            palette.muted("tokens:"),
            palette.paint(t.tokens.to_string(), Style::Count),
            palette.muted("literals dropped:"),
            palette.paint(t.literals_dropped.to_string(), Style::Count),
        );
    }
    println!();
}

fn fmt_edge(edge: &Edge, palette: &Palette) -> String {
    format!(
        "{} {} {}",
        fmt_endpoint(&edge.source, palette),
        palette.paint(format!("-{}->", edge.relation), Style::Relation),
        fmt_endpoint(&edge.target, palette),
    )
}

fn fmt_endpoint(endpoint: &Endpoint, palette: &Palette) -> String {
    match (&endpoint.position, &endpoint.concept) {
        (Some(position), Some(concept)) => format!(
            "{}{}",
            palette.paint(&endpoint.handle, Style::Handle),
            palette.muted(format!("[{} {}]", position, concept))
        ),
        _ => format!("{}{}", palette.paint(&endpoint.handle, Style::Handle), palette.muted("[?]")),
    }
}

fn fmt_diagnostic(diag: &Diagnostic, palette: &Palette) -> String {
    match diag {
        Diagnostic::AmbiguousHandle { handle, kept, ignored, position } => format!(
            "{} '{}' at {}: kept {}, ignored {}",
            palette.paint("ambiguous handle", Style::Count),
            handle,
            position,
            kept,
            ignored
        ),
        Diagnostic::RedefinedHandle { handle, position } => {
            format!("{} '{}' at {}", palette.muted("redefined handle"), handle, position)
        }
    }
}
