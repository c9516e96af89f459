use super::element::Element;

/// Serializes rows as a pipe table; the first row is the header.
pub fn markdown_table(rows: &[Vec<String>]) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };
    let row = |cells: &[String]| {
        let inner: Vec<String> = cells.iter().map(|c| format!(" {c} ")).collect();
        format!("|{}|\n", inner.join("|"))
    };
    let mut out = row(header);
    out.push_str(&format!("|{}|\n", vec![" --- "; header.len()].join("|")));
    for r in &rows[1..] {
        out.push_str(&row(r));
    }
    out
}

/// Native `table > thead/tbody` with each cell built by `cell`.
pub fn table_element(rows: &[Vec<String>], mut cell: impl FnMut(&str, &str) -> Element) -> Element {
    let mut table = Element::new("table");
    if let Some(header) = rows.first() {
        let tr = header
            .iter()
            .fold(Element::new("tr"), |tr, c| tr.child(cell("th", c)));
        table = table.child(Element::new("thead").child(tr));
    }
    let mut body = Element::new("tbody");
    for r in rows.iter().skip(1) {
        let tr = r
            .iter()
            .fold(Element::new("tr"), |tr, c| tr.child(cell("td", c)));
        body = body.child(tr);
    }
    table.child(body)
}
