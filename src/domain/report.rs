use super::{category_table::CategoryTable, tag::Category};

pub const NO_RESULTS_MESSAGE: &str = "找不到相關評論";

/// Renders the category table as the reply text.
///
/// Each category gets a `【label: pct%】` header followed by its tags, in the
/// fixed order of [`Category::ALL`]. With nothing to count no percentages are
/// computed and [`NO_RESULTS_MESSAGE`] is returned instead.
pub fn format_report(table: &CategoryTable, total_count: usize) -> String {
    if total_count == 0 {
        return NO_RESULTS_MESSAGE.to_string();
    }

    let mut response = String::new();

    for category in Category::ALL {
        let category_sum = table.category_sum(category);
        let percentage = category_sum as f64 / total_count as f64 * 100.0;

        response.push_str(&format!("【{}: {:.1}%】\n", category.label(), percentage));
        for (tag, count) in table.sorted_entries(category) {
            response.push_str(&format!("{}: {} 篇\n", tag, count));
        }
        response.push('\n');
    }

    response.push_str(&format!("總共 {} 篇評論", total_count));
    response
}

#[cfg(test)]
mod tests {
    use super::{format_report, NO_RESULTS_MESSAGE};
    use crate::domain::{category_table::aggregate, tag::Tag};

    #[test]
    fn report_with_two_categories() {
        let tags: Vec<Tag> = ["好雷", "好雷", "負雷"].into_iter().map(Tag::from).collect();
        let (table, total) = aggregate(&tags);

        let expected = "【好評: 66.7%】\n好雷: 2 篇\n\n\
                        【負評: 33.3%】\n負雷: 1 篇\n\n\
                        【普通: 0.0%】\n\n\
                        【其它: 0.0%】\n\n\
                        總共 3 篇評論";
        assert_eq!(format_report(&table, total), expected);
    }

    #[test]
    fn report_orders_tags_within_category() {
        let tags: Vec<Tag> = ["好雷", "超好雷", "超好雷", "普雷"]
            .into_iter()
            .map(Tag::from)
            .collect();
        let (table, total) = aggregate(&tags);
        let report = format_report(&table, total);

        assert!(report.starts_with("【好評: 75.0%】\n超好雷: 2 篇\n好雷: 1 篇\n"));
        assert!(report.contains("【普通: 25.0%】\n普雷: 1 篇\n"));
        assert!(report.ends_with("總共 4 篇評論"));
    }

    #[test]
    fn report_without_results() {
        let (table, total) = aggregate(&[]);
        assert_eq!(format_report(&table, total), NO_RESULTS_MESSAGE);
    }
}
