//! Contact bubble mutations.
//!
//! Geometry writes clamp unconditionally: `x`/`y` into `[0,100]`, `size`
//! into `[40,120]`, even on directly-supplied out-of-range input.

use rand::Rng;
use uuid::Uuid;

use crate::command::BatchTargets;
use crate::content::url::normalize_url;
use crate::content::{ContactBubble, ContactsData};
use crate::error::{PlinthError, Result};

/// Default diameter for a new bubble.
const DEFAULT_SIZE: f64 = 60.0;

/// Colors cycled through for new bubbles.
const PALETTE: [&str; 6] = [
    "#ff6b6b", "#feca57", "#48dbfb", "#1dd1a1", "#5f27cd", "#ff9ff3",
];

/// Minimum per-axis spacing kept between a new bubble and every existing
/// one while candidates remain.
const SPACING: f64 = 15.0;

/// Draws a position for a new bubble: up to 10 candidates in
/// `[10,90] x [15,85]`, accepting the first one farther than 15 units from
/// every existing bubble on both axes. After 10 failed draws the last
/// candidate is accepted anyway; overlap never blocks the add.
fn place<R: Rng>(rng: &mut R, existing: &[ContactBubble]) -> (f64, f64) {
    let mut candidate = (50.0, 50.0);
    for _ in 0..10 {
        candidate = (rng.gen_range(10.0..=90.0), rng.gen_range(15.0..=85.0));
        let clear = existing.iter().all(|b| {
            (candidate.0 - b.x).abs() > SPACING && (candidate.1 - b.y).abs() > SPACING
        });
        if clear {
            return candidate;
        }
    }
    candidate
}

fn parse_number(raw: &str, what: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| PlinthError::validation(format!("{what} must be a number, got '{raw}'")))
}

fn is_hex_color(raw: &str) -> bool {
    let Some(digits) = raw.strip_prefix('#') else {
        return false;
    };
    (digits.len() == 3 || digits.len() == 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn require_bubble<'a>(data: &'a ContactsData, id: &str) -> Result<&'a ContactBubble> {
    data.find_bubble(id)
        .ok_or_else(|| PlinthError::not_found("bubble", id))
}

/// Adds a bubble at a randomly drawn position.
pub fn add<R: Rng>(data: &ContactsData, url: &str, rng: &mut R) -> Result<(ContactsData, String)> {
    let (x, y) = place(rng, &data.bubbles);
    let color = PALETTE[data.bubbles.len() % PALETTE.len()].to_string();
    let mut bubble = ContactBubble {
        id: Uuid::new_v4().to_string(),
        url: normalize_url(url),
        size: DEFAULT_SIZE,
        color,
        x,
        y,
    };
    bubble.clamp();
    let short_id = bubble.id[..8].to_string();
    let mut next = data.clone();
    next.bubbles.push(bubble);
    Ok((next, format!("Bubble {short_id} added")))
}

/// Replaces a bubble's URL.
pub fn edit(data: &ContactsData, id: &str, url: &str) -> Result<(ContactsData, String)> {
    require_bubble(data, id)?;
    let mut next = data.clone();
    for bubble in &mut next.bubbles {
        if bubble.id == id {
            bubble.url = normalize_url(url);
        }
    }
    Ok((next, format!("Bubble {id} updated")))
}

/// Moves a bubble, clamping the target position into the canvas.
pub fn move_to(data: &ContactsData, id: &str, x: &str, y: &str) -> Result<(ContactsData, String)> {
    require_bubble(data, id)?;
    let x = parse_number(x, "x")?;
    let y = parse_number(y, "y")?;
    let mut next = data.clone();
    let mut landed = (x, y);
    for bubble in &mut next.bubbles {
        if bubble.id == id {
            bubble.x = x;
            bubble.y = y;
            bubble.clamp();
            landed = (bubble.x, bubble.y);
        }
    }
    Ok((next, format!("Bubble {id} moved to ({}, {})", landed.0, landed.1)))
}

/// Resizes a bubble, clamping into `[40,120]`.
pub fn resize(data: &ContactsData, id: &str, size: &str) -> Result<(ContactsData, String)> {
    require_bubble(data, id)?;
    let size = parse_number(size, "size")?;
    let mut next = data.clone();
    let mut landed = size;
    for bubble in &mut next.bubbles {
        if bubble.id == id {
            bubble.size = size;
            bubble.clamp();
            landed = bubble.size;
        }
    }
    Ok((next, format!("Bubble {id} resized to {landed}")))
}

/// Recolors a bubble. The value must be `#rgb` or `#rrggbb` hex.
pub fn color(data: &ContactsData, id: &str, color: &str) -> Result<(ContactsData, String)> {
    require_bubble(data, id)?;
    if !is_hex_color(color) {
        return Err(PlinthError::validation(format!(
            "'{color}' is not a hex color like #ff8800"
        )));
    }
    let mut next = data.clone();
    for bubble in &mut next.bubbles {
        if bubble.id == id {
            bubble.color = color.to_string();
        }
    }
    Ok((next, format!("Bubble {id} recolored to {color}")))
}

/// Removes a bubble by id.
pub fn remove(data: &ContactsData, id: &str) -> Result<(ContactsData, String)> {
    require_bubble(data, id)?;
    let mut next = data.clone();
    next.bubbles.retain(|b| b.id != id);
    Ok((next, format!("Bubble {id} removed")))
}

/// Replaces the contact-page description.
pub fn set_description(data: &ContactsData, text: &str) -> Result<(ContactsData, String)> {
    let mut next = data.clone();
    next.description = text.to_string();
    Ok((next, "Contact description updated".to_string()))
}

/// Adds one bubble per URL entry.
pub fn batch_add<R: Rng>(
    data: &ContactsData,
    entries: &[String],
    rng: &mut R,
) -> Result<(ContactsData, String)> {
    let mut next = data.clone();
    let mut added = 0usize;
    for entry in entries {
        let url = entry.trim();
        if url.is_empty() || url.split_whitespace().count() != 1 {
            continue;
        }
        (next, _) = add(&next, url, rng)?;
        added += 1;
    }
    Ok((next, format!("Added {added} bubbles")))
}

/// Removes the listed bubble ids (or all bubbles), reporting the count.
pub fn batch_remove(data: &ContactsData, targets: &BatchTargets) -> Result<(ContactsData, String)> {
    let mut next = data.clone();
    let removed = match targets {
        BatchTargets::All => {
            let count = next.bubbles.len();
            next.bubbles.clear();
            count
        }
        BatchTargets::Names(ids) => {
            let before = next.bubbles.len();
            next.bubbles.retain(|b| !ids.contains(&b.id));
            before - next.bubbles.len()
        }
    };
    Ok((next, format!("Removed {removed} bubbles")))
}
