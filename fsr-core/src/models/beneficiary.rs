/// The person an income summary is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Beneficiary {
    Veteran,
    Spouse,
}

impl Beneficiary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Veteran => "veteran",
            Self::Spouse => "spouse",
        }
    }

    /// Key of the gross salary field on a legacy current-employment entry.
    pub fn gross_salary_key(&self) -> &'static str {
        match self {
            Self::Veteran => "veteran_gross_salary",
            Self::Spouse => "spouse_gross_salary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_is_lowercase_label() {
        assert_eq!(Beneficiary::Veteran.as_str(), "veteran");
        assert_eq!(Beneficiary::Spouse.as_str(), "spouse");
    }

    #[test]
    fn gross_salary_key_is_prefixed_by_beneficiary() {
        assert_eq!(Beneficiary::Veteran.gross_salary_key(), "veteran_gross_salary");
        assert_eq!(Beneficiary::Spouse.gross_salary_key(), "spouse_gross_salary");
    }
}
