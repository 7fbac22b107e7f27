use crate::grid::cell_from_value;
use crate::{Grid, LifeError, Result};
use std::path::Path;

/// Parse a seed grid.
///
/// The first non-empty line holds `rows cols`, followed by exactly `rows`
/// lines of `cols` whitespace-separated `0`/`1` tokens. Blank lines after
/// the last row are ignored.
pub fn parse_seed(data: &[u8]) -> Result<Grid> {
    let text = std::str::from_utf8(data).map_err(|e| {
        let line = data[..e.valid_up_to()].iter().filter(|&&b| b == b'\n').count() + 1;
        LifeError::malformed(line, "seed is not valid UTF-8")
    })?;
    // (one-based line number, content)
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let (header_line, header) = lines
        .by_ref()
        .find(|(_, l)| !l.trim().is_empty())
        .ok_or_else(|| LifeError::malformed(1, "missing `rows cols` header"))?;
    let (rows, cols) = parse_header(header_line, header)?;

    // every cell takes at least one input byte, so a lying header can't reserve more
    let mut cells = Vec::with_capacity((rows * cols).min(data.len()));
    let mut last_line = header_line;
    for row in 0..rows {
        let (line_no, line) = lines.next().ok_or_else(|| {
            LifeError::malformed(
                last_line + 1,
                format!("expected {rows} rows of cells, found {row}"),
            )
        })?;
        last_line = line_no;

        let before = cells.len();
        for token in line.split_whitespace() {
            if cells.len() - before == cols {
                return Err(LifeError::malformed(
                    line_no,
                    format!("more than {cols} cells in row {row}"),
                ));
            }
            cells.push(parse_cell(line_no, token)?);
        }
        let found = cells.len() - before;
        if found != cols {
            return Err(LifeError::malformed(
                line_no,
                format!("expected {cols} cells in row {row}, found {found}"),
            ));
        }
    }

    if let Some((line_no, _)) = lines.find(|(_, l)| !l.trim().is_empty()) {
        return Err(LifeError::malformed(
            line_no,
            format!("unexpected content after {rows} rows"),
        ));
    }

    Ok(Grid::from_cells(rows, cols, cells))
}

/// Read and parse a seed file.
pub fn load_seed(path: impl AsRef<Path>) -> Result<Grid> {
    let data = std::fs::read(path)?;
    parse_seed(&data)
}

impl std::str::FromStr for Grid {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        parse_seed(s.as_bytes())
    }
}

fn parse_header(line_no: usize, line: &str) -> Result<(usize, usize)> {
    let mut tokens = line.split_whitespace();
    let mut dimension = |name: &str| -> Result<usize> {
        let token = tokens
            .next()
            .ok_or_else(|| LifeError::malformed(line_no, format!("missing {name} in header")))?;
        let value = token.parse::<i64>().map_err(|_| {
            LifeError::malformed(line_no, format!("{name} `{token}` is not an integer"))
        })?;
        if value <= 0 {
            return Err(LifeError::validation(format!(
                "{name} must be positive, got {value}"
            )));
        }
        usize::try_from(value)
            .map_err(|_| LifeError::validation(format!("{name} {value} is too large")))
    };
    let rows = dimension("rows")?;
    let cols = dimension("cols")?;
    if tokens.next().is_some() {
        return Err(LifeError::malformed(
            line_no,
            "header must contain exactly `rows cols`",
        ));
    }
    if rows.checked_mul(cols).is_none() {
        return Err(LifeError::validation(format!("grid {rows}x{cols} is too large")));
    }
    Ok((rows, cols))
}

fn parse_cell(line_no: usize, token: &str) -> Result<bool> {
    let value = token
        .parse::<i64>()
        .map_err(|_| LifeError::malformed(line_no, format!("`{token}` is not an integer")))?;
    u8::try_from(value)
        .ok()
        .and_then(cell_from_value)
        .ok_or_else(|| {
            LifeError::validation(format!(
                "cell value {value} on line {line_no} is not 0 or 1"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLINKER: &[u8] = b"3 4\n0 1 0 0\n0 1 0 0\n0 1 0 0\n";

    #[test]
    fn parses_rows_in_order() {
        let grid = parse_seed(BLINKER).unwrap();
        assert_eq!(grid.size(), (3, 4));
        assert_eq!(grid.population(), 3);
        for row in 0..3 {
            assert_eq!(grid.row(row), &[false, true, false, false]);
        }
    }

    #[test]
    fn tolerates_crlf_tabs_and_trailing_blank_lines() {
        let grid = parse_seed(b"\n2  2\r\n1\t0\r\n0 1\r\n\n\n").unwrap();
        assert_eq!(grid.to_rows(), vec![vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn from_str_matches_parse_seed() {
        let grid: Grid = "1 3\n1 0 1".parse().unwrap();
        assert_eq!(grid, parse_seed(b"1 3\n1 0 1\n").unwrap());
    }

    #[test]
    fn missing_header() {
        let err = parse_seed(b"  \n\n").unwrap_err();
        assert!(matches!(err, LifeError::MalformedSeed { line: 1, .. }), "{err}");
    }

    #[test]
    fn malformed_header() {
        for data in [&b"3\n"[..], b"3 x\n", b"3 3 3\n", b"three 3\n"] {
            let err = parse_seed(data).unwrap_err();
            assert!(matches!(err, LifeError::MalformedSeed { line: 1, .. }), "{err}");
        }
    }

    #[test]
    fn non_positive_dimensions() {
        for data in [&b"0 3\n"[..], b"3 0\n", b"-2 3\n"] {
            let err = parse_seed(data).unwrap_err();
            assert!(matches!(err, LifeError::Validation(_)), "{err}");
        }
    }

    #[test]
    fn missing_rows() {
        let err = parse_seed(b"3 2\n1 0\n0 1\n").unwrap_err();
        assert!(matches!(err, LifeError::MalformedSeed { line: 4, .. }), "{err}");
    }

    #[test]
    fn huge_header_without_body() {
        let err = parse_seed(b"50000 50000\n").unwrap_err();
        assert!(matches!(err, LifeError::MalformedSeed { line: 2, .. }), "{err}");
    }

    #[test]
    fn wrong_token_count() {
        let err = parse_seed(b"2 3\n1 0 1\n0 1\n").unwrap_err();
        assert!(matches!(err, LifeError::MalformedSeed { line: 3, .. }), "{err}");

        let err = parse_seed(b"2 3\n1 0 1 1\n0 1 0\n").unwrap_err();
        assert!(matches!(err, LifeError::MalformedSeed { line: 2, .. }), "{err}");
    }

    #[test]
    fn blank_line_inside_grid_is_a_missing_row() {
        let err = parse_seed(b"2 2\n1 1\n\n1 1\n").unwrap_err();
        assert!(matches!(err, LifeError::MalformedSeed { line: 3, .. }), "{err}");
    }

    #[test]
    fn extra_rows() {
        let err = parse_seed(b"1 2\n1 1\n0 0\n").unwrap_err();
        assert!(matches!(err, LifeError::MalformedSeed { line: 3, .. }), "{err}");
    }

    #[test]
    fn non_binary_cells() {
        let err = parse_seed(b"1 3\n1 2 0\n").unwrap_err();
        assert!(matches!(err, LifeError::Validation(_)), "{err}");

        let err = parse_seed(b"1 3\n1 -1 0\n").unwrap_err();
        assert!(matches!(err, LifeError::Validation(_)), "{err}");

        let err = parse_seed(b"1 3\n1 a 0\n").unwrap_err();
        assert!(matches!(err, LifeError::MalformedSeed { line: 2, .. }), "{err}");
    }

    #[test]
    fn invalid_utf8() {
        let err = parse_seed(b"1 2\n1 \xff\n").unwrap_err();
        assert!(matches!(err, LifeError::MalformedSeed { line: 2, .. }), "{err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_seed("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, LifeError::Io(_)), "{err}");
    }
}
