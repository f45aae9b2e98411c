use crate::draft::{LostItemDraft, ValidationErrors};

pub const MIN_FIELD_CHARS: usize = 4;
pub const TEXT_TOO_SHORT_MESSAGE: &str = "Item name is too short (at least 4 characters)";
pub const IMAGE_MISSING_MESSAGE: &str = "Please provide and image of the item";

/// Runs every check and reports all failures together.
pub fn validate_draft(draft: &LostItemDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if too_short(&draft.title) {
        errors.title = TEXT_TOO_SHORT_MESSAGE.to_string();
    }
    if too_short(&draft.location) {
        errors.location = TEXT_TOO_SHORT_MESSAGE.to_string();
    }
    if draft.local_image.as_deref().map_or(true, str::is_empty) {
        errors.image = IMAGE_MISSING_MESSAGE.to_string();
    }

    errors
}

/// Measured in UTF-16 code units, matching how the mobile clients count.
fn too_short(text: &str) -> bool {
    text.encode_utf16().count() < MIN_FIELD_CHARS
}

#[cfg(test)]
mod tests {
    use super::{validate_draft, IMAGE_MISSING_MESSAGE, TEXT_TOO_SHORT_MESSAGE};
    use crate::draft::LostItemDraft;

    fn draft(title: &str, location: &str, image: Option<&str>) -> LostItemDraft {
        LostItemDraft {
            title: title.to_string(),
            location: location.to_string(),
            local_image: image.map(str::to_string),
            ..LostItemDraft::default()
        }
    }

    #[test]
    fn short_fields_each_get_a_message() {
        for short in ["", "a", "Key", "abc"] {
            let errors = validate_draft(&draft(short, "Lobby", Some("file:///x.jpg")));
            assert_eq!(errors.title, TEXT_TOO_SHORT_MESSAGE, "title {short:?}");
            assert!(errors.location.is_empty());

            let errors = validate_draft(&draft("Wallet", short, Some("file:///x.jpg")));
            assert_eq!(errors.location, TEXT_TOO_SHORT_MESSAGE, "location {short:?}");
            assert!(errors.title.is_empty());
        }
    }

    #[test]
    fn four_characters_is_enough() {
        let errors = validate_draft(&draft("Keys", "Hall", Some("file:///x.jpg")));
        assert!(errors.is_empty());
    }

    #[test]
    fn counts_utf16_units_not_bytes() {
        let errors = validate_draft(&draft("Café", "Gare", Some("file:///x.jpg")));
        assert!(errors.is_empty());

        let errors = validate_draft(&draft("🏮🏮", "🗺🗺", Some("file:///x.jpg")));
        assert!(errors.is_empty());

        let errors = validate_draft(&draft("🏮", "Gare", Some("file:///x.jpg")));
        assert_eq!(errors.title, TEXT_TOO_SHORT_MESSAGE);

        let errors = validate_draft(&draft("日本語", "Gare", Some("file:///x.jpg")));
        assert_eq!(errors.title, TEXT_TOO_SHORT_MESSAGE);
    }

    #[test]
    fn missing_image_is_reported() {
        let errors = validate_draft(&draft("Wallet", "Lobby", None));
        assert_eq!(errors.image, IMAGE_MISSING_MESSAGE);

        let errors = validate_draft(&draft("Wallet", "Lobby", Some("")));
        assert_eq!(errors.image, IMAGE_MISSING_MESSAGE);
    }

    #[test]
    fn every_failure_is_reported_at_once() {
        let errors = validate_draft(&draft("", "", None));

        assert_eq!(errors.title, TEXT_TOO_SHORT_MESSAGE);
        assert_eq!(errors.location, TEXT_TOO_SHORT_MESSAGE);
        assert_eq!(errors.image, IMAGE_MISSING_MESSAGE);
    }
}
