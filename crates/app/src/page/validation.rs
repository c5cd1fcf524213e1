use farmwatch_domain::page::VALIDATED_CLASS;

use crate::ports::{Element, SubmitDecision};

/// Submit handler for forms marked `.needs-validation`.
pub struct FormValidator;

impl FormValidator {
    /// Block the submission of an invalid form. The form is always marked
    /// validated so its fields render their feedback.
    pub fn on_submit<E: Element>(form: &E) -> SubmitDecision {
        let valid = form.check_validity();
        form.add_class(VALIDATED_CLASS);
        if valid {
            SubmitDecision::Proceed
        } else {
            SubmitDecision::Block
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fakes::FakeElement;

    #[test]
    fn should_block_invalid_form_and_mark_it_validated() {
        let form = FakeElement::new().with_class("needs-validation").invalid();

        assert_eq!(FormValidator::on_submit(&form), SubmitDecision::Block);
        assert!(form.has_class("was-validated"));
    }

    #[test]
    fn should_let_valid_form_through_and_mark_it_validated() {
        let form = FakeElement::new().with_class("needs-validation");

        assert_eq!(FormValidator::on_submit(&form), SubmitDecision::Proceed);
        assert!(form.has_class("was-validated"));
    }

    #[test]
    fn should_reevaluate_on_each_submit() {
        let form = FakeElement::new().invalid();
        assert_eq!(FormValidator::on_submit(&form), SubmitDecision::Block);

        form.set_valid(true);
        assert_eq!(FormValidator::on_submit(&form), SubmitDecision::Proceed);
        assert_eq!(form.class_name(), "was-validated");
    }
}
