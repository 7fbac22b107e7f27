use crate::Grid;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};

/// One line per row: `[1, 0, 1]`.
impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            f.write_str("[")?;
            for (col, &cell) in self.row(row).iter().enumerate() {
                if col > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", cell as u8)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Write one generation followed by the blank separator line.
pub fn write_generation(out: &mut impl Write, grid: &Grid) -> io::Result<()> {
    write!(out, "{grid}")?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_bracketed_and_comma_separated() {
        let grid = Grid::from_rows(vec![vec![1, 0, 1], vec![0, 0, 0]]).unwrap();
        assert_eq!(grid.to_string(), "[1, 0, 1]\n[0, 0, 0]\n");
    }

    #[test]
    fn single_column() {
        let grid = Grid::from_rows(vec![vec![1], vec![0]]).unwrap();
        assert_eq!(grid.to_string(), "[1]\n[0]\n");
    }

    #[test]
    fn generation_ends_with_blank_line() {
        let grid = Grid::from_rows(vec![vec![0, 1]]).unwrap();
        let mut out = Vec::new();
        write_generation(&mut out, &grid).unwrap();
        write_generation(&mut out, &grid).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[0, 1]\n\n[0, 1]\n\n");
    }
}
