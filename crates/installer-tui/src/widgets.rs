//! Small text helpers shared by the screens.

pub fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn radio(selected: bool) -> &'static str {
    if selected {
        "(•)"
    } else {
        "( )"
    }
}

/// Row prefix for the item under the cursor.
pub fn cursor(focused: bool) -> &'static str {
    if focused {
        "▶"
    } else {
        " "
    }
}

/// Footer button text; disabled buttons are bracketed with dashes.
pub fn button(label: &str, disabled: bool) -> String {
    if disabled {
        format!("[-{}-]", label)
    } else {
        format!("[ {} ]", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers() {
        assert_eq!(checkbox(true), "[x]");
        assert_eq!(radio(false), "( )");
        assert_eq!(button("Next", true), "[-Next-]");
        assert_eq!(button("Next", false), "[ Next ]");
    }
}
