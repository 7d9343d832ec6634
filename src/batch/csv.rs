//! Header-aware CSV table: enough of RFC 4180 for sensor exports
//! (quoted fields, doubled quotes, CRLF). Fields may not span lines.

use crate::error::{Error, Result};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn split_line(line: &str, line_no: usize) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match (quoted, c) {
            (true, '"') if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            (true, '"') => quoted = false,
            (true, c) => field.push(c),
            (false, '"') if field.is_empty() => quoted = true,
            (false, ',') => fields.push(std::mem::take(&mut field)),
            (false, c) => field.push(c),
        }
    }
    if quoted {
        return Err(Error::Csv(format!("line {}: unterminated quoted field", line_no)));
    }
    fields.push(field);
    Ok(fields)
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl CsvTable {
    pub fn read(reader: impl BufRead) -> Result<Self> {
        let mut lines = reader
            .lines()
            .enumerate()
            .map(|(i, l)| l.map(|l| (i + 1, l)));

        let (_, header_line) = loop {
            match lines.next() {
                Some(l) => {
                    let (n, l) = l?;
                    if !l.trim().is_empty() {
                        break (n, l);
                    }
                }
                None => return Err(Error::Csv("no header row".into())),
            }
        };
        let headers: Vec<String> = split_line(header_line.trim_end_matches('\r'), 1)?
            .into_iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for l in lines {
            let (n, line) = l?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let fields = split_line(line, n)?;
            if fields.len() != headers.len() {
                return Err(Error::Csv(format!(
                    "line {}: expected {} fields, found {}",
                    n,
                    headers.len(),
                    fields.len()
                )));
            }
            rows.push(fields);
        }
        Ok(Self { headers, rows })
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn write(&self, w: &mut impl Write) -> std::io::Result<()> {
        let header: Vec<String> = self.headers.iter().map(|h| quote(h)).collect();
        writeln!(w, "{}", header.join(","))?;
        for row in &self.rows {
            let fields: Vec<String> = row.iter().map(|f| quote(f)).collect();
            writeln!(w, "{}", fields.join(","))?;
        }
        Ok(())
    }
}
