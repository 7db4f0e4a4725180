use alertscope::columns::RoleAssignment;
use alertscope::patterns::{aggregate, normalize_key, PATTERN_KEY_LEN, UNKNOWN_RESOURCE};
use alertscope::table::Table;

fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    let mut t = Table::new(columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        t.push_row(row.iter().map(|c| c.to_string()).collect());
    }
    t
}

fn roles(description: &str, resource: Option<&str>) -> RoleAssignment {
    RoleAssignment {
        description: Some(description.to_string()),
        resource: resource.map(|r| r.to_string()),
        ..Default::default()
    }
}

#[test]
fn key_is_trimmed_collapsed_and_truncated() {
    assert_eq!(normalize_key("  CPU high  "), "CPU high");
    assert_eq!(normalize_key("CPU high\non host\r\nA"), "CPU high on host A");

    let base = "A".repeat(PATTERN_KEY_LEN);
    let long = format!("{base} and a very long tail");
    assert_eq!(normalize_key(&long), base);
}

#[test]
fn identical_prefixes_share_a_pattern_regardless_of_tail() {
    let base = "Disk space below threshold on volume /data/part".to_string();
    assert_eq!(base.len(), 47);
    let d1 = format!("{base}001 at 80%");
    let d2 = format!("{base}001 at 95% later that day");
    let t = table(&["Desc"], &[&[&d1], &[&d2]]);

    let book = aggregate(&t, &roles("Desc", None));
    assert_eq!(book.distinct_patterns(), 1);
    let ranked = book.ranked();
    assert_eq!(ranked[0].count, 2);
    assert_eq!(ranked[0].key.chars().count(), PATTERN_KEY_LEN);
}

#[test]
fn case_is_preserved_so_casing_variants_stay_distinct() {
    let t = table(&["Desc"], &[&["CPU Usage"], &["cpu usage"]]);
    let book = aggregate(&t, &roles("Desc", None));
    assert_eq!(book.distinct_patterns(), 2);
}

#[test]
fn unusable_descriptions_count_toward_total_only() {
    let t = table(
        &["Desc"],
        &[&["CPU high"], &["#N/A"], &[""], &["Unknown"], &["CPU high"]],
    );
    let book = aggregate(&t, &roles("Desc", None));
    assert_eq!(book.total_rows, 5);
    assert_eq!(book.unusable_keys, 3);
    assert_eq!(book.distinct_patterns(), 1);
    assert_eq!(book.ranked()[0].count, 2);
}

#[test]
fn pattern_counts_sum_to_total_minus_unusable() {
    let t = table(
        &["Desc"],
        &[
            &["alpha"], &["beta"], &["alpha"], &["#N/A"], &["gamma"], &[""],
        ],
    );
    let book = aggregate(&t, &roles("Desc", None));
    let sum: usize = book.ranked().iter().map(|p| p.count).sum();
    assert_eq!(sum + book.unusable_keys, book.total_rows);
}

#[test]
fn ranking_orders_by_count_then_first_seen() {
    let t = table(
        &["Desc"],
        &[&["beta"], &["gamma"], &["alpha"], &["alpha"], &["gamma"], &["alpha"]],
    );
    let book = aggregate(&t, &roles("Desc", None));
    let keys: Vec<&str> = book.ranked().iter().map(|p| p.key.as_str()).collect();
    // alpha: 3, gamma: 2, beta: 1; a count tie keeps first-seen order.
    assert_eq!(keys, vec!["alpha", "gamma", "beta"]);

    let tied = table(&["Desc"], &[&["beta"], &["alpha"], &["beta"], &["alpha"]]);
    let book = aggregate(&tied, &roles("Desc", None));
    let keys: Vec<&str> = book.ranked().iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["beta", "alpha"]);
}

#[test]
fn resources_are_counted_per_pattern_and_overall() {
    let t = table(
        &["Desc", "Elemento"],
        &[
            &["CPU high", "host-a"],
            &["CPU high", "host-a"],
            &["CPU high", "host-b"],
            &["Disk low", "host-b"],
            &["#N/A", "host-c"],
        ],
    );
    let book = aggregate(&t, &roles("Desc", Some("Elemento")));

    let ranked = book.ranked();
    assert_eq!(ranked[0].key, "CPU high");
    assert_eq!(ranked[0].resources.ranked(), vec![("host-a", 2), ("host-b", 1)]);

    // Overall noise covers every row, the unusable-description one included.
    assert_eq!(
        book.resource_noise.ranked(),
        vec![("host-a", 2), ("host-b", 2), ("host-c", 1)],
    );
}

#[test]
fn empty_resource_cells_fall_back_to_unknown() {
    let t = table(
        &["Desc", "Elemento"],
        &[&["CPU high", "  "], &["CPU high", ""]],
    );
    let book = aggregate(&t, &roles("Desc", Some("Elemento")));
    assert_eq!(book.ranked()[0].resources.ranked(), vec![(UNKNOWN_RESOURCE, 2)]);
}

#[test]
fn without_resource_role_no_resource_counting_happens() {
    let t = table(&["Desc", "Elemento"], &[&["CPU high", "host-a"]]);
    let book = aggregate(&t, &roles("Desc", None));
    assert!(book.resource_noise.is_empty());
    assert!(book.ranked()[0].resources.is_empty());
}
