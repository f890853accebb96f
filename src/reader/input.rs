//! Keyboard navigation

/// Where a key event originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTarget {
    /// The reading surface or page chrome
    Reader,
    /// A text input or textarea; keys belong to the field
    TextInput,
}

/// Page turn requested by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    PrevPage,
    NextPage,
}

/// Map a key name (DOM `KeyboardEvent.key` spelling) to a page turn
pub fn navigation_for_key(key: &str, target: KeyTarget) -> Option<NavigationAction> {
    if target == KeyTarget::TextInput {
        return None;
    }

    match key {
        "ArrowLeft" => Some(NavigationAction::PrevPage),
        "ArrowRight" => Some(NavigationAction::NextPage),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            navigation_for_key("ArrowLeft", KeyTarget::Reader),
            Some(NavigationAction::PrevPage)
        );
        assert_eq!(
            navigation_for_key("ArrowRight", KeyTarget::Reader),
            Some(NavigationAction::NextPage)
        );
        assert_eq!(navigation_for_key("Enter", KeyTarget::Reader), None);
    }

    #[test]
    fn test_text_inputs_keep_their_keys() {
        assert_eq!(navigation_for_key("ArrowLeft", KeyTarget::TextInput), None);
    }
}
