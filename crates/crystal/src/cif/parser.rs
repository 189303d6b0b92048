//! CIF reader.
//!
//! Tokenizes CIF text into data blocks of tag/value pairs and loops, then
//! rebuilds a [`Structure`] from the first block's cell parameters and
//! `_atom_site_*` loop. Only P1 blocks are accepted: the atom list is taken
//! as-is, so any symmetry operation other than the identity is rejected.

use crate::error::CifError;
use crate::model::{Lattice, Site, Species, Structure};

/// Rows closer than this in every fractional coordinate share one site.
const SAME_SITE_TOLERANCE: f64 = 1e-8;

/// Parses CIF text into a [`Structure`].
pub fn parse(input: &str) -> Result<Structure, CifError> {
    let blocks = Parser::new(input).parse_document()?;
    let block = blocks.into_iter().next().ok_or(CifError::NoDataBlock)?;
    structure_from_block(&block)
}

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum CifValue {
    Text(String),
    Inapplicable,
    Unknown,
}

impl CifValue {
    fn as_str(&self) -> Option<&str> {
        match self {
            CifValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value with any `(uncertainty)` suffix stripped.
    fn as_f64(&self) -> Option<f64> {
        let s = self.as_str()?;
        let s = match s.find('(') {
            Some(idx) => &s[..idx],
            None => s,
        };
        s.parse().ok()
    }
}

#[derive(Debug, Default)]
struct Block {
    pairs: Vec<(String, CifValue)>,
    loops: Vec<Loop>,
}

impl Block {
    fn get(&self, tag: &str) -> Option<&CifValue> {
        self.pairs
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(tag))
            .map(|(_, v)| v)
    }

    fn find_loop(&self, tag: &str) -> Option<&Loop> {
        self.loops.iter().find(|l| l.column(tag).is_some())
    }
}

#[derive(Debug)]
struct Loop {
    tags: Vec<String>,
    values: Vec<CifValue>,
}

impl Loop {
    fn nrows(&self) -> usize {
        if self.tags.is_empty() {
            0
        } else {
            self.values.len() / self.tags.len()
        }
    }

    fn column(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.eq_ignore_ascii_case(tag))
    }

    fn cell(&self, row: usize, column: usize) -> Option<&CifValue> {
        self.values.get(row * self.tags.len() + column)
    }
}

// ---------------------------------------------------------------------------
// Tokenizer / parser
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Token {
    DataBlock,
    LoopStart,
    Tag(String),
    Val(CifValue),
    Eof,
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    at_line_start: bool,
    pending: Option<Token>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            at_line_start: true,
            pending: None,
        }
    }

    fn next(&mut self) -> Result<Token, CifError> {
        if let Some(token) = self.pending.take() {
            return Ok(token);
        }
        self.scan_token()
    }

    fn push_back(&mut self, token: Token) {
        self.pending = Some(token);
    }

    fn skip_whitespace_and_comments(&mut self) {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'\n' => {
                    self.pos += 1;
                    self.at_line_start = true;
                }
                b'#' => {
                    while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_token(&mut self) -> Result<Token, CifError> {
        self.skip_whitespace_and_comments();
        if self.pos >= self.bytes.len() {
            return Ok(Token::Eof);
        }

        let b = self.bytes[self.pos];
        if b == b';' && self.at_line_start {
            return self.scan_text_field();
        }
        self.at_line_start = false;

        if b == b'\'' || b == b'"' {
            return self.scan_quoted(b);
        }

        let start = self.pos;
        while self.pos < self.bytes.len() {
            let c = self.bytes[self.pos];
            if c.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        Ok(classify_unquoted(&self.input[start..self.pos]))
    }

    fn scan_quoted(&mut self, quote: u8) -> Result<Token, CifError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            if self.pos >= self.bytes.len() {
                return Err(CifError::UnterminatedQuote(start));
            }
            // A closing quote only counts when followed by whitespace or EOF.
            if self.bytes[self.pos] == quote
                && (self.pos + 1 >= self.bytes.len()
                    || self.bytes[self.pos + 1].is_ascii_whitespace())
            {
                let text = self.input[start + 1..self.pos].to_string();
                self.pos += 1;
                return Ok(Token::Val(CifValue::Text(text)));
            }
            self.pos += 1;
        }
    }

    fn scan_text_field(&mut self) -> Result<Token, CifError> {
        let start = self.pos;
        self.pos += 1;
        self.at_line_start = false;
        let content_start = self.pos;

        loop {
            while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                self.pos += 1;
            }
            if self.pos >= self.bytes.len() {
                return Err(CifError::UnterminatedTextField(start));
            }
            self.pos += 1;

            if self.pos < self.bytes.len() && self.bytes[self.pos] == b';' {
                let text = self.input[content_start..self.pos - 1].to_string();
                self.pos += 1;
                return Ok(Token::Val(CifValue::Text(text)));
            }
        }
    }

    fn parse_document(&mut self) -> Result<Vec<Block>, CifError> {
        let mut blocks = Vec::new();
        loop {
            match self.next()? {
                Token::Eof => break,
                Token::DataBlock => blocks.push(self.parse_block()?),
                _ => {}
            }
        }
        Ok(blocks)
    }

    fn parse_block(&mut self) -> Result<Block, CifError> {
        let mut block = Block::default();
        loop {
            let token = self.next()?;
            match token {
                Token::Eof | Token::DataBlock => {
                    self.push_back(token);
                    break;
                }
                Token::LoopStart => block.loops.push(self.parse_loop()?),
                Token::Tag(tag) => match self.next()? {
                    Token::Val(value) => block.pairs.push((tag, value)),
                    other => self.push_back(other),
                },
                Token::Val(_) => {}
            }
        }
        Ok(block)
    }

    fn parse_loop(&mut self) -> Result<Loop, CifError> {
        let mut tags = Vec::new();
        let mut values = Vec::new();

        loop {
            match self.next()? {
                Token::Tag(tag) => tags.push(tag),
                other => {
                    self.push_back(other);
                    break;
                }
            }
        }
        loop {
            match self.next()? {
                Token::Val(value) => values.push(value),
                other => {
                    self.push_back(other);
                    break;
                }
            }
        }

        Ok(Loop { tags, values })
    }
}

fn classify_unquoted(s: &str) -> Token {
    let lower = s.to_ascii_lowercase();
    if lower.starts_with("data_") {
        Token::DataBlock
    } else if lower == "loop_" {
        Token::LoopStart
    } else if s.starts_with('_') {
        Token::Tag(s.to_string())
    } else if s == "." {
        Token::Val(CifValue::Inapplicable)
    } else if s == "?" {
        Token::Val(CifValue::Unknown)
    } else {
        Token::Val(CifValue::Text(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Structure extraction
// ---------------------------------------------------------------------------

fn structure_from_block(block: &Block) -> Result<Structure, CifError> {
    let number = |tag: &str| -> Result<f64, CifError> {
        let value = block
            .get(tag)
            .ok_or_else(|| CifError::MissingTag(tag.to_string()))?;
        value.as_f64().ok_or_else(|| invalid(tag, value))
    };

    let lattice = Lattice::from_parameters(
        number("_cell_length_a")?,
        number("_cell_length_b")?,
        number("_cell_length_c")?,
        number("_cell_angle_alpha")?,
        number("_cell_angle_beta")?,
        number("_cell_angle_gamma")?,
    )?;

    check_p1(block)?;

    let atoms = block
        .find_loop("_atom_site_fract_x")
        .ok_or_else(|| CifError::MissingTag("_atom_site_fract_x".to_string()))?;
    let column = |tag: &str| {
        atoms
            .column(tag)
            .ok_or_else(|| CifError::MissingTag(tag.to_string()))
    };
    let coords = [
        column("_atom_site_fract_x")?,
        column("_atom_site_fract_y")?,
        column("_atom_site_fract_z")?,
    ];
    let symbol_column = atoms
        .column("_atom_site_type_symbol")
        .or_else(|| atoms.column("_atom_site_label"))
        .ok_or_else(|| CifError::MissingTag("_atom_site_type_symbol".to_string()))?;
    let occupancy_column = atoms.column("_atom_site_occupancy");

    let mut sites: Vec<Site> = Vec::new();
    for row in 0..atoms.nrows() {
        let mut frac = [0.0; 3];
        for (slot, (col, tag)) in frac.iter_mut().zip(coords.iter().zip([
            "_atom_site_fract_x",
            "_atom_site_fract_y",
            "_atom_site_fract_z",
        ])) {
            let value = atoms.cell(row, *col).unwrap_or(&CifValue::Unknown);
            *slot = value.as_f64().ok_or_else(|| invalid(tag, value))?;
        }

        let symbol_value = atoms.cell(row, symbol_column).unwrap_or(&CifValue::Unknown);
        let element = symbol_value
            .as_str()
            .and_then(element_symbol)
            .ok_or_else(|| invalid("_atom_site_type_symbol", symbol_value))?;

        let occupancy = match occupancy_column.and_then(|col| atoms.cell(row, col)) {
            None | Some(CifValue::Unknown) | Some(CifValue::Inapplicable) => 1.0,
            Some(value) => value
                .as_f64()
                .ok_or_else(|| invalid("_atom_site_occupancy", value))?,
        };

        let species = Species::new(element, occupancy);
        match sites.last_mut() {
            Some(last) if same_position(&last.frac_coords, &frac) => last.species.push(species),
            _ => sites.push(Site::new(vec![species], frac)),
        }
    }

    Ok(Structure::new(lattice, sites)?)
}

fn check_p1(block: &Block) -> Result<(), CifError> {
    for tag in ["_symmetry_equiv_pos_as_xyz", "_space_group_symop_operation_xyz"] {
        let Some(ops) = block.find_loop(tag) else {
            continue;
        };
        let Some(col) = ops.column(tag) else {
            continue;
        };
        for row in 0..ops.nrows() {
            if let Some(value) = ops.cell(row, col)
                && !is_identity(value.as_str().unwrap_or_default())
            {
                return Err(invalid(tag, value));
            }
        }
    }
    Ok(())
}

fn is_identity(op: &str) -> bool {
    let compact: String = op
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact == "x,y,z" || compact == "+x,+y,+z"
}

/// Leading element symbol of a type symbol or label (`Fe2+` -> `Fe`, `C12` -> `C`).
fn element_symbol(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    let first = chars.next().filter(char::is_ascii_uppercase)?;
    let mut symbol = first.to_string();
    symbol.extend(chars.take_while(char::is_ascii_lowercase));
    Some(symbol)
}

fn same_position(a: &[f64; 3], b: &[f64; 3]) -> bool {
    a.iter()
        .zip(b)
        .all(|(x, y)| (x - y).abs() < SAME_SITE_TOLERANCE)
}

fn invalid(tag: &str, value: &CifValue) -> CifError {
    let value = match value {
        CifValue::Text(s) => s.clone(),
        CifValue::Inapplicable => ".".to_string(),
        CifValue::Unknown => "?".to_string(),
    };
    CifError::InvalidValue {
        tag: tag.to_string(),
        value,
    }
}
