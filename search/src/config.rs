use nucleo::pattern::{CaseMatching as NucleoCaseMatching, Normalization};
use sift_core::CaseMatching;

pub(crate) fn case_matching(case_matching: CaseMatching) -> NucleoCaseMatching {
    match case_matching {
        CaseMatching::Sensitive => NucleoCaseMatching::Respect,
        CaseMatching::Insensitive => NucleoCaseMatching::Ignore,
        CaseMatching::Smart => NucleoCaseMatching::Smart,
    }
}

pub(crate) fn normalization(unicode_normalization: bool) -> Normalization {
    if unicode_normalization {
        Normalization::Smart
    } else {
        Normalization::Never
    }
}
