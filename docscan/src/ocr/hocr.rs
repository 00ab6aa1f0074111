//! hOCR output parsing.
//!
//! Tesseract reports per-word confidences through its hOCR renderer. Each
//! `ocr_line`-like element becomes one [`TextRegion`]: its words joined by a
//! single space, its bbox taken from the element's `title`, and its
//! confidence the mean word `x_wconf` scaled to `[0, 1]`.

use scraper::{ElementRef, Html, Selector};

use super::recognizer::{BoundingBox, TextRegion};

const LINE_SELECTOR: &str = "span.ocr_line, span.ocr_header, span.ocr_caption, span.ocr_textfloat";
const WORD_SELECTOR: &str = "span.ocrx_word";

pub fn parse_hocr(hocr: &str) -> Vec<TextRegion> {
    let document = Html::parse_fragment(hocr);
    let line_selector = Selector::parse(LINE_SELECTOR).unwrap();
    let word_selector = Selector::parse(WORD_SELECTOR).unwrap();

    document
        .select(&line_selector)
        .filter_map(|line| parse_line(line, &word_selector))
        .collect()
}

fn parse_line(line: ElementRef<'_>, word_selector: &Selector) -> Option<TextRegion> {
    let mut words = Vec::new();
    let mut confidence_sum = 0.0;

    for word in line.select(word_selector) {
        let text = word.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        let title = word.value().attr("title").unwrap_or_default();
        let wconf = title_property(title, "x_wconf")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        confidence_sum += (wconf / 100.0).clamp(0.0, 1.0);
        words.push(text.to_string());
    }

    if words.is_empty() {
        return None;
    }

    let bbox = line
        .value()
        .attr("title")
        .and_then(|title| title_property(title, "bbox"))
        .and_then(parse_bbox)
        .unwrap_or_default();

    let confidence = confidence_sum / words.len() as f64;
    Some(TextRegion::new(bbox, words.join(" "), confidence))
}

/// Look up a property in an hOCR `title` attribute,
/// e.g. `"bbox 36 92 96 116; x_wconf 93"`.
fn title_property<'a>(title: &'a str, key: &str) -> Option<&'a str> {
    title.split(';').find_map(|part| {
        let part = part.trim();
        let (name, value) = part.split_once(char::is_whitespace)?;
        (name == key).then_some(value)
    })
}

fn parse_bbox(value: &str) -> Option<BoundingBox> {
    let mut coords = value.split_whitespace().map(|v| v.parse::<u32>().ok());
    Some(BoundingBox {
        x0: coords.next()??,
        y0: coords.next()??,
        x1: coords.next()??,
        y1: coords.next()??,
    })
}
