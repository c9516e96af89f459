/// Pipe tables: a header row immediately followed by a `---` divider.
///
/// A table is *direct* when its header starts with `|`; then header and
/// divider must both be closed by edge pipes and every body row keeps them.
/// Otherwise edge pipes are optional.
pub struct Table;

/// A matched header + divider pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHead {
    pub direct: bool,
    pub header: Vec<String>,
    pub columns: usize,
}

impl Table {
    pub const PIPE: char = '|';
    pub const DIVIDER: char = '-';

    /// Splits a row into trimmed cells, dropping empty edge cells.
    pub fn cells(line: &str) -> Vec<String> {
        let t = line.trim();
        let t = t.strip_prefix(Self::PIPE).unwrap_or(t);
        let t = t.strip_suffix(Self::PIPE).unwrap_or(t);
        t.split(Self::PIPE).map(|c| c.trim().to_string()).collect()
    }

    fn has_edges(line: &str) -> bool {
        let t = line.trim();
        t.len() >= 2 && t.starts_with(Self::PIPE) && t.ends_with(Self::PIPE)
    }

    fn divider_columns(line: &str, direct: bool) -> Option<usize> {
        if !line.contains(Self::PIPE) {
            // a lone `---` is a rule, not a one-column divider
            return None;
        }
        if direct && !Self::has_edges(line) {
            return None;
        }
        let cells = Self::cells(line);
        let valid = cells
            .iter()
            .all(|c| !c.is_empty() && c.chars().all(|ch| ch == Self::DIVIDER));
        valid.then_some(cells.len())
    }

    /// Detects a header line followed by a valid divider line.
    pub fn open(header: &str, divider: Option<&str>) -> Option<TableHead> {
        if !header.contains(Self::PIPE) {
            return None;
        }
        let direct = header.trim_start().starts_with(Self::PIPE);
        if direct && !Self::has_edges(header) {
            return None;
        }
        let columns = Self::divider_columns(divider?, direct)?;
        Some(TableHead {
            direct,
            header: Self::fit(Self::cells(header), columns),
            columns,
        })
    }

    /// True if `line` continues the body of a table opened with `head`.
    pub fn continues(head: &TableHead, line: &str) -> bool {
        line.contains(Self::PIPE) && (!head.direct || Self::has_edges(line))
    }

    /// Pads or truncates a row to `columns` cells.
    pub fn fit(mut row: Vec<String>, columns: usize) -> Vec<String> {
        row.resize(columns, String::new());
        row
    }
}
