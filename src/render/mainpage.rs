//! Aggregate page: overview pages collected from every file, then enum groups.

use super::BANNER;
use crate::model::Accumulators;

pub fn render(acc: &Accumulators) -> String {
    let mut out = String::from(BANNER);
    out.push_str("/**\n");
    // The main page has to come first
    out.push_str(&acc.mainpage.concat());
    out.push('\n');
    out.push_str(&acc.otherpage.concat());
    out.push('\n');
    out.push_str("*/\n");
    // Each enum group is a self-contained comment block
    out.push_str(&acc.enums.concat());
    out
}
