use chrono::NaiveDate;

use innovation_portal::dto::applications::ApplicationRow;
use innovation_portal::listing::{
    apply, ApplicationFilter, ExpertFilter, SortDirection, SortKey,
};

fn row(id: i32, title: &str, status_id: i32, expert: Option<i32>, day: u32) -> ApplicationRow {
    ApplicationRow {
        id,
        title: title.to_string(),
        description: "description".to_string(),
        age_group: "Students (19-24)".to_string(),
        prototype_url: None,
        documents: vec![],
        applicant_id: 1,
        field_id: 1,
        municipality_id: 1,
        status_id,
        assigned_expert_id: expert,
        created_at: NaiveDate::from_ymd_opt(2025, 8, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        field_label: "Education".to_string(),
        municipality_label: "Tirana".to_string(),
        status_label: "New".to_string(),
        status_color: "#6c757d".to_string(),
        expert_name: None,
    }
}

#[test]
fn test_title_filter_is_case_insensitive_substring() {
    let rows = vec![
        row(1, "Solar irrigation", 1, None, 1),
        row(2, "Wind turbines", 1, None, 2),
        row(3, "solar heaters", 1, None, 3),
    ];
    let filter = ApplicationFilter {
        title: Some("SOLAR".to_string()),
        ..Default::default()
    };

    let result = apply(rows, &filter, SortKey::CreatedAt, SortDirection::Asc);
    let ids: Vec<i32> = result.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_filters_narrow_never_add() {
    let rows = vec![
        row(1, "One", 1, None, 1),
        row(2, "Two", 2, Some(7), 2),
        row(3, "Three", 2, None, 3),
    ];
    let filter = ApplicationFilter {
        status_ids: vec![2],
        ..Default::default()
    };

    let result = apply(rows.clone(), &filter, SortKey::CreatedAt, SortDirection::Asc);
    assert!(result.iter().all(|r| r.status_id == 2));
    assert!(result.len() <= rows.len());

    // An empty filter keeps everything.
    let all = apply(rows, &ApplicationFilter::default(), SortKey::CreatedAt, SortDirection::Asc);
    assert_eq!(all.len(), 3);
}

#[test]
fn test_unassigned_sentinel_combines_with_expert_ids() {
    let rows = vec![
        row(1, "One", 1, None, 1),
        row(2, "Two", 1, Some(7), 2),
        row(3, "Three", 1, Some(9), 3),
    ];
    let filter = ApplicationFilter {
        experts: vec![ExpertFilter::Unassigned, ExpertFilter::Expert(9)],
        ..Default::default()
    };

    let result = apply(rows, &filter, SortKey::CreatedAt, SortDirection::Asc);
    let ids: Vec<i32> = result.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn test_sort_by_title_ignores_case() {
    let rows = vec![
        row(1, "beta", 1, None, 1),
        row(2, "Alpha", 1, None, 2),
        row(3, "gamma", 1, None, 3),
    ];

    let ascending = apply(
        rows.clone(),
        &ApplicationFilter::default(),
        SortKey::Title,
        SortDirection::Asc,
    );
    let titles: Vec<&str> = ascending.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "beta", "gamma"]);

    let descending = apply(
        rows,
        &ApplicationFilter::default(),
        SortKey::Title,
        SortDirection::Desc,
    );
    let titles: Vec<&str> = descending.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["gamma", "beta", "Alpha"]);
}

#[test]
fn test_apply_is_idempotent() {
    let rows = vec![
        row(1, "beta", 1, Some(7), 1),
        row(2, "Alpha", 2, None, 2),
        row(3, "gamma", 2, None, 3),
    ];
    let filter = ApplicationFilter {
        status_ids: vec![2],
        ..Default::default()
    };

    let once = apply(rows, &filter, SortKey::Title, SortDirection::Asc);
    let twice = apply(once.clone(), &filter, SortKey::Title, SortDirection::Asc);
    let once_ids: Vec<i32> = once.iter().map(|r| r.id).collect();
    let twice_ids: Vec<i32> = twice.iter().map(|r| r.id).collect();
    assert_eq!(once_ids, twice_ids);
}
