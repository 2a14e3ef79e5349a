//! Document gallery mutations.

use std::str::FromStr;

use uuid::Uuid;

use crate::command::BatchTargets;
use crate::content::url::{derive_preview_url, normalize_url};
use crate::content::{Document, DocumentType, DocumentsData};
use crate::error::{PlinthError, Result};

use super::today;

fn parse_type(raw: &str) -> Result<DocumentType> {
    DocumentType::from_str(&raw.to_lowercase()).map_err(|_| {
        PlinthError::validation(format!(
            "Unknown document type '{raw}' (expected video, image, pdf, text or ppt)"
        ))
    })
}

fn build_document(
    doc_type: DocumentType,
    name: &str,
    url: &str,
    description: &str,
    date_added: String,
) -> Document {
    let url = normalize_url(url);
    let preview_url = derive_preview_url(&url);
    Document {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        doc_type,
        url,
        preview_url,
        description: description.to_string(),
        date_added,
    }
}

/// Adds a document. `previewUrl` is derived from the URL and `dateAdded`
/// is today.
pub fn add(
    data: &DocumentsData,
    doc_type: &str,
    name: &str,
    url: &str,
    description: &str,
) -> Result<(DocumentsData, String)> {
    let doc_type = parse_type(doc_type)?;
    if let Some(existing) = data.find_document(name) {
        return Err(PlinthError::validation(format!(
            "A document named '{}' already exists",
            existing.name
        )));
    }
    let mut next = data.clone();
    next.documents
        .push(build_document(doc_type, name, url, description, today()));
    Ok((next, format!("Document '{name}' added")))
}

/// Replaces a document's fields, preserving its id and original
/// `dateAdded` and recomputing `previewUrl` from the new URL.
pub fn edit(
    data: &DocumentsData,
    name: &str,
    doc_type: &str,
    new_name: &str,
    new_url: &str,
    description: &str,
) -> Result<(DocumentsData, String)> {
    let doc_type = parse_type(doc_type)?;
    let Some(original) = data.find_document(name) else {
        return Err(PlinthError::not_found("document", name));
    };
    if !name.eq_ignore_ascii_case(new_name) {
        if let Some(existing) = data.find_document(new_name) {
            return Err(PlinthError::validation(format!(
                "A document named '{}' already exists",
                existing.name
            )));
        }
    }
    let id = original.id.clone();
    let date_added = original.date_added.clone();
    let needle = name.to_lowercase();
    let mut next = data.clone();
    for doc in &mut next.documents {
        if doc.name.to_lowercase() == needle {
            let mut replacement =
                build_document(doc_type, new_name, new_url, description, date_added.clone());
            replacement.id = id.clone();
            *doc = replacement;
        }
    }
    Ok((next, format!("Document '{name}' updated")))
}

/// Removes a document by name.
pub fn remove(data: &DocumentsData, name: &str) -> Result<(DocumentsData, String)> {
    if data.find_document(name).is_none() {
        return Err(PlinthError::not_found("document", name));
    }
    let needle = name.to_lowercase();
    let mut next = data.clone();
    next.documents.retain(|d| d.name.to_lowercase() != needle);
    Ok((next, format!("Document '{name}' removed")))
}

/// Adds every well-formed `type name url description` sub-entry.
pub fn batch_add(data: &DocumentsData, entries: &[String]) -> Result<(DocumentsData, String)> {
    let mut next = data.clone();
    let mut added = 0usize;
    for entry in entries {
        let parts: Vec<&str> = entry.split_whitespace().collect();
        let [doc_type, name, url, description @ ..] = parts.as_slice() else {
            continue;
        };
        if description.is_empty() {
            continue;
        }
        let Ok(doc_type) = parse_type(doc_type) else {
            continue;
        };
        if next.find_document(name).is_some() {
            continue;
        }
        next.documents.push(build_document(
            doc_type,
            name,
            url,
            &description.join(" "),
            today(),
        ));
        added += 1;
    }
    Ok((next, format!("Added {added} documents")))
}

/// Removes the named documents (or all of them), reporting the count.
pub fn batch_remove(
    data: &DocumentsData,
    targets: &BatchTargets,
) -> Result<(DocumentsData, String)> {
    let mut next = data.clone();
    let removed = match targets {
        BatchTargets::All => {
            let count = next.documents.len();
            next.documents.clear();
            count
        }
        BatchTargets::Names(names) => {
            let needles: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
            let before = next.documents.len();
            next.documents
                .retain(|d| !needles.contains(&d.name.to_lowercase()));
            before - next.documents.len()
        }
    };
    Ok((next, format!("Removed {removed} documents")))
}
