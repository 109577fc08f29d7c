//! Unified digit group driver
//!
//! Behavior is specified once against [`DigitGroupDriver`] and run against
//! every host that implements it.

/// Abstract driver for a page holding one digit group
///
/// # Example
///
/// ```rust
/// use otp_digits::prelude::*;
///
/// let mut driver = WasmDriver::new(6);
/// driver.focus_slot(0);
/// driver.type_key("4");
/// assert_eq!(driver.aggregate(), "4");
/// assert_eq!(driver.focused_slot(), Some(1));
/// ```
pub trait DigitGroupDriver {
    /// Number of digit slots
    fn slot_count(&self) -> usize;

    /// Focuses a digit slot
    fn focus_slot(&mut self, index: usize);

    /// Moves focus outside the group
    fn blur(&mut self);

    /// Sends a keydown to the focused slot; returns whether it was prevented
    fn type_key(&mut self, key: &str) -> bool;

    /// Sends a keydown with Ctrl held to the focused slot
    fn type_key_with_ctrl(&mut self, key: &str) -> bool;

    /// Pastes plain text into the document; returns whether it was prevented
    fn paste(&mut self, text: &str) -> bool;

    /// Current slot values in order
    fn slot_values(&self) -> Vec<String>;

    /// Current aggregate field value
    fn aggregate(&self) -> String;

    /// The focused slot, if focus is on one
    fn focused_slot(&self) -> Option<usize>;

    /// Types each character of `digits` in turn
    fn type_digits(&mut self, digits: &str) {
        for c in digits.chars() {
            self.type_key(&c.to_string());
        }
    }
}

// ===== Unified Test Specifications =====
// These run against ANY DigitGroupDriver implementation

/// Concatenation of slot values
fn concat<D: DigitGroupDriver>(driver: &D) -> String {
    driver.slot_values().concat()
}

/// Verifies digit entry advances focus and keeps the aggregate in sync
pub fn verify_digit_entry<D: DigitGroupDriver>(driver: &mut D) {
    let n = driver.slot_count();
    driver.focus_slot(0);
    for i in 0..n {
        let digit = char::from_digit((i % 10) as u32, 10).unwrap_or('0');
        assert!(driver.type_key(&digit.to_string()));
        assert_eq!(driver.focused_slot(), Some((i + 1) % n));
        assert_eq!(driver.aggregate(), concat(&*driver));
        assert!(driver.aggregate().len() <= n);
    }
    assert_eq!(driver.aggregate().len(), n);
}

/// Verifies wrapping arrow navigation at both ends and in the interior
pub fn verify_navigation<D: DigitGroupDriver>(driver: &mut D) {
    let n = driver.slot_count();
    let before = driver.slot_values();
    for i in [0, n / 2, n - 1] {
        driver.focus_slot(i);
        assert!(driver.type_key("ArrowRight"));
        assert_eq!(driver.focused_slot(), Some((i + 1) % n));

        driver.focus_slot(i);
        assert!(driver.type_key("ArrowLeft"));
        assert_eq!(driver.focused_slot(), Some((i + n - 1) % n));
    }
    assert_eq!(driver.slot_values(), before);
}

/// Verifies backspace clears the rightmost filled slot
pub fn verify_backspace<D: DigitGroupDriver>(driver: &mut D) {
    let n = driver.slot_count();

    // Drain whatever is there
    driver.focus_slot(0);
    for _ in 0..n {
        driver.type_key("Backspace");
    }
    assert_eq!(driver.aggregate(), "");

    // Empty group: nothing moves
    driver.focus_slot(n - 1);
    assert!(driver.type_key("Backspace"));
    assert_eq!(driver.focused_slot(), Some(n - 1));
    assert!(driver.slot_values().iter().all(String::is_empty));

    // Fill the first two (or one) slots and clear the rightmost
    driver.focus_slot(0);
    let filled = n.min(2);
    driver.type_digits(&"7".repeat(filled));
    driver.type_key("Backspace");
    assert_eq!(driver.focused_slot(), Some(filled.saturating_sub(2)));
    assert_eq!(driver.aggregate(), "7".repeat(filled - 1));
    assert_eq!(driver.aggregate(), concat(&*driver));
}

/// Verifies non-digit keys are suppressed without effect
pub fn verify_ignored_keys<D: DigitGroupDriver>(driver: &mut D) {
    driver.focus_slot(0);
    let before = driver.slot_values();
    for key in ["a", "Enter", " ", "-", "Tab", "ArrowUp"] {
        assert!(driver.type_key(key), "{key} should be prevented");
        assert_eq!(driver.focused_slot(), Some(0));
    }
    assert_eq!(driver.slot_values(), before);

    assert!(!driver.type_key_with_ctrl("v"));
    assert!(!driver.type_key_with_ctrl("5"));
    assert_eq!(driver.slot_values(), before);
}

/// Verifies paste acceptance and rejection
pub fn verify_paste<D: DigitGroupDriver>(driver: &mut D) {
    let n = driver.slot_count();
    let code: String = (0..n)
        .map(|i| char::from_digit(((i + 1) % 10) as u32, 10).unwrap_or('0'))
        .collect();

    driver.focus_slot(0);
    assert!(driver.paste(&code));
    assert_eq!(driver.aggregate(), code);
    assert_eq!(driver.focused_slot(), Some(n - 1));

    let before = driver.slot_values();
    let longer = format!("{code}0");
    let shorter = &code[..n - 1];
    let lettered = format!("a{}", &code[1..]);
    for text in [longer.as_str(), shorter, lettered.as_str()] {
        assert!(driver.paste(text), "{text:?} should be prevented");
        assert_eq!(driver.slot_values(), before);
    }

    driver.blur();
    assert!(!driver.paste(&code));
}

/// The six-slot walkthrough: type, type, backspace, paste
pub fn verify_six_digit_scenario<D: DigitGroupDriver>(driver: &mut D) {
    assert_eq!(driver.slot_count(), 6);
    driver.focus_slot(0);

    driver.type_key("4");
    assert_eq!(driver.slot_values()[0], "4");
    assert_eq!(driver.focused_slot(), Some(1));
    assert_eq!(driver.aggregate(), "4");

    driver.type_key("2");
    assert_eq!(driver.slot_values()[1], "2");
    assert_eq!(driver.focused_slot(), Some(2));
    assert_eq!(driver.aggregate(), "42");

    driver.type_key("Backspace");
    assert_eq!(driver.slot_values()[1], "");
    assert_eq!(driver.focused_slot(), Some(0));
    assert_eq!(driver.aggregate(), "4");

    driver.paste("123456");
    assert_eq!(driver.slot_values(), vec!["1", "2", "3", "4", "5", "6"]);
    assert_eq!(driver.focused_slot(), Some(5));
    assert_eq!(driver.aggregate(), "123456");
}

/// Complete verification suite for a fresh driver
pub fn run_full_specification<D: DigitGroupDriver>(driver: &mut D) {
    verify_ignored_keys(driver);
    verify_digit_entry(driver);
    verify_navigation(driver);
    verify_backspace(driver);
    verify_paste(driver);
}
