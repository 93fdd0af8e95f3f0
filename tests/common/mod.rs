//! Shared fixtures: a tiny PDF writer and scripted decoders.

#![allow(dead_code)]

use std::cell::Cell;
use std::path::Path;

use pagewise::{DecodeError, OpenDecoder, PageDecoder};

/// Build a minimal but well-formed PDF with one line of Helvetica text per page.
pub fn sample_pdf(pages: &[&str]) -> Vec<u8> {
    build_pdf(pages, "")
}

/// Like [`sample_pdf`], but the trailer declares a standard security handler.
pub fn encrypted_pdf(pages: &[&str]) -> Vec<u8> {
    build_pdf(
        pages,
        " /Encrypt << /Filter /Standard /V 1 /R 2 /O <00> /U <00> /P -4 >>",
    )
}

fn build_pdf(pages: &[&str], trailer_extra: &str) -> Vec<u8> {
    let mut objects: Vec<String> = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        String::new(), // page tree, filled in below
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut kids = Vec::with_capacity(pages.len());
    for text in pages {
        let page_obj = objects.len() + 1;
        let content_obj = page_obj + 1;
        kids.push(format!("{} 0 R", page_obj));

        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            content_obj
        ));

        let stream = format!("BT /F1 12 Tf 72 720 Td ({}) Tj ET", escape(text));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ));
    }
    objects[1] = format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    );

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R{} >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        trailer_extra,
        xref_offset
    ));

    out.into_bytes()
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// What a scripted decoder does for one page.
#[derive(Debug, Clone)]
pub enum Step {
    Text(String),
    Fail(String),
    Panic(String),
}

pub fn text(s: &str) -> Step {
    Step::Text(s.to_string())
}

pub fn fail(reason: &str) -> Step {
    Step::Fail(reason.to_string())
}

/// Decoder that plays back one step per page and counts its calls.
pub struct ScriptedDecoder {
    steps: Vec<Step>,
    calls: Cell<Vec<u32>>,
}

impl ScriptedDecoder {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            calls: Cell::new(Vec::new()),
        }
    }

    /// Page numbers requested so far, in call order.
    pub fn calls(&self) -> Vec<u32> {
        let calls = self.calls.take();
        self.calls.set(calls.clone());
        calls
    }
}

impl PageDecoder for ScriptedDecoder {
    fn page_count(&self) -> u32 {
        self.steps.len() as u32
    }

    fn extract_page_text(&self, page: u32) -> Result<String, DecodeError> {
        let mut calls = self.calls.take();
        calls.push(page);
        self.calls.set(calls);

        match &self.steps[(page - 1) as usize] {
            Step::Text(s) => Ok(s.clone()),
            Step::Fail(reason) => Err(DecodeError::new(page, reason.clone())),
            Step::Panic(msg) => panic!("{}", msg),
        }
    }
}

thread_local! {
    pub static OPEN_CALLS: Cell<u32> = const { Cell::new(0) };
    pub static LIVE_HANDLES: Cell<i32> = const { Cell::new(0) };
}

/// Decoder over plain text files: pages are separated by form feeds and a
/// page reading `!fail` fails to decode. Tracks open and live handles.
pub struct TextFileDecoder {
    pages: Vec<String>,
}

impl OpenDecoder for TextFileDecoder {
    fn open(path: &Path) -> pagewise::Result<Self> {
        OPEN_CALLS.with(|c| c.set(c.get() + 1));
        let content = std::fs::read_to_string(path)?;
        if !content.starts_with("PAGES") {
            return Err(pagewise::Error::Format("missing PAGES header".into()));
        }

        LIVE_HANDLES.with(|c| c.set(c.get() + 1));
        let pages = content["PAGES".len()..]
            .split('\u{c}')
            .map(|p| p.to_string())
            .collect();
        Ok(Self { pages })
    }
}

impl PageDecoder for TextFileDecoder {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_page_text(&self, page: u32) -> Result<String, DecodeError> {
        let text = &self.pages[(page - 1) as usize];
        if text.trim() == "!fail" {
            Err(DecodeError::new(page, "unreadable page"))
        } else {
            Ok(text.clone())
        }
    }
}

impl Drop for TextFileDecoder {
    fn drop(&mut self) {
        LIVE_HANDLES.with(|c| c.set(c.get() - 1));
    }
}

pub fn open_calls() -> u32 {
    OPEN_CALLS.with(|c| c.get())
}

pub fn live_handles() -> i32 {
    LIVE_HANDLES.with(|c| c.get())
}
