// FILE: crates/content-sources/src/page.rs

//! Field extraction from DLsite work pages

use crate::{FetchedWork, SourceError, SourceResult};
use dlshelf_core::{RawWorkRecord, WorkId};
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> SourceResult<Selector> {
    Selector::parse(css).map_err(|e| SourceError::ParseError(format!("bad selector {}: {:?}", css, e)))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Extracts the raw record and cover locator from one work page
///
/// Fields the page does not carry stay `None`; a page without a title is
/// rejected.
pub fn parse_work_page(id: &WorkId, html: &str) -> SourceResult<FetchedWork> {
    let document = Html::parse_document(html);
    let mut record = RawWorkRecord::new(id.clone());

    record.title = document
        .select(&selector("h1#work_name")?)
        .next()
        .map(text_of)
        .filter(|title| !title.trim().is_empty());
    if record.title.is_none() {
        return Err(SourceError::ParseError(format!("{}: page has no title", id)));
    }

    record.circle = document
        .select(&selector("span.maker_name")?)
        .next()
        .map(text_of);
    record.tags = extract_tags(&document)?;

    for (header, value) in outline_rows(&document)? {
        let slot = match header.as_str() {
            "Age" => &mut record.age,
            "Author" => &mut record.author,
            "Illustration" => &mut record.illustration,
            "Product format" => &mut record.product_format,
            "Release date" => &mut record.release_date,
            "Scenario" => &mut record.scenario,
            "Series name" => &mut record.series,
            "Voice Actor" => &mut record.voice_actor,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    let mut work = FetchedWork::new(record);
    if let Some(cover) = cover_locator(&document)? {
        work = work.with_cover(cover);
    }
    Ok(work)
}

fn extract_tags(document: &Html) -> SourceResult<Vec<String>> {
    let Some(genre) = document.select(&selector("div.main_genre")?).next() else {
        return Ok(Vec::new());
    };

    let linked: Vec<String> = genre
        .select(&selector("a")?)
        .map(text_of)
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();
    if !linked.is_empty() {
        return Ok(linked);
    }

    Ok(text_of(genre)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// `(header, value)` pairs of the work outline table
fn outline_rows(document: &Html) -> SourceResult<Vec<(String, String)>> {
    let row_selector = selector("table#work_outline tr")?;
    let th = selector("th")?;
    let td = selector("td")?;

    let mut rows = Vec::new();
    for row in document.select(&row_selector) {
        let (Some(header), Some(data)) = (row.select(&th).next(), row.select(&td).next()) else {
            continue;
        };
        let header = text_of(header).trim().to_string();

        // Format badges are separate elements; keep them apart.
        let value = if header == "Product format" {
            data.text()
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            text_of(data)
        };
        rows.push((header, value));
    }
    Ok(rows)
}

fn cover_locator(document: &Html) -> SourceResult<Option<String>> {
    let Some(img) = document
        .select(&selector("li.slider_item.active img")?)
        .next()
    else {
        return Ok(None);
    };

    let raw = img
        .value()
        .attr("srcset")
        .and_then(|srcset| srcset.split(',').next())
        .and_then(|candidate| candidate.split_whitespace().next())
        .or_else(|| img.value().attr("src"))
        .map(str::trim)
        .filter(|locator| !locator.is_empty());

    Ok(raw.map(|locator| {
        if locator.starts_with("//") {
            format!("https:{}", locator)
        } else {
            locator.to_string()
        }
    }))
}
