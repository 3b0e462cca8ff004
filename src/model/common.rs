pub type Id = String;

/// Namespace prefix for ids minted by the tree builder. Backend category ids
/// are plain UUIDs/slugs and never start with this, so synthetic ids can
/// never collide with natural ones.
pub const SYNTHETIC_ID_PREFIX: &str = "syn-";

/// Derive a stable, lowercase, dash-separated slug from a display label.
///
/// Letters and digits are kept (Unicode-aware, so Vietnamese labels survive),
/// every other run of characters collapses to a single `-`. Idempotent:
/// `slug(slug(x)) == slug(x)`.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Mint the id of a synthetic node from its parent id and its own label.
pub fn synthetic_id(parent_id: Option<&str>, label: &str) -> Id {
    match parent_id {
        Some(parent) => format!("{}-{}", parent, slug(label)),
        None => format!("{}{}", SYNTHETIC_ID_PREFIX, slug(label)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slug("Phụ tùng  theo xe"), "phụ-tùng-theo-xe");
        assert_eq!(slug("Wave Alpha (110cc)"), "wave-alpha-110cc");
    }

    #[test]
    fn slug_is_idempotent() {
        let once = slug("Đồ chơi & Trang trí");
        assert_eq!(slug(&once), once);
    }

    #[test]
    fn synthetic_ids_chain_from_parent() {
        let root = synthetic_id(None, "Phụ tùng theo xe");
        assert_eq!(root, "syn-phụ-tùng-theo-xe");
        let brand = synthetic_id(Some(&root), "Honda");
        assert_eq!(brand, "syn-phụ-tùng-theo-xe-honda");
    }
}
