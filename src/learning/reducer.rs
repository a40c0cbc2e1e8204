use crate::rule::Rule;

/// Coverage test: drop rules subsumed by a more general, better scoring rule
///
/// Rules are stably sorted by descending n/r score. Then, for each rule `i`
/// from the second onward, every earlier rule `j` is tried; if `j` binds to the
/// antecedent of `i`, rule `i` is removed and the scan restarts at `j = 0`
/// against whichever rule now occupies position `i`.
pub fn reduce_coverage(mut rules: Vec<Rule>) -> Vec<Rule> {
    rules.sort_by(|a, b| b.cmp_score(a));

    let mut i = 1;
    while i < rules.len() {
        let mut j = 0;
        while j < i {
            if rules[j].binds(rules[i].antecedent()) {
                rules.remove(i);
                j = 0;
                if i >= rules.len() {
                    break;
                }
            } else {
                j += 1;
            }
        }
        i += 1;
    }

    rules
}
