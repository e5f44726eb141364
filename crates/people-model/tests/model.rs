//! Tests for people-model types and the table view.

use people_model::{
    Aggregation, ColumnId, Gender, Person, SortSpec, Summary, TableOptions, TableView, ViewRow,
    total_count,
};

fn person(id: &str, state: &str, gender: Gender, age: u32, salary: f64) -> Person {
    Person {
        id: id.to_string(),
        first_name: format!("First-{id}"),
        last_name: format!("Last-{id}"),
        age,
        gender,
        state: state.to_string(),
        salary,
        sub_rows: None,
    }
}

fn sample_forest() -> Vec<Person> {
    let mut parent = person("p1", "Ohio", Gender::Female, 30, 3000.0);
    parent.sub_rows = Some(vec![
        person("c1", "Utah", Gender::Male, 5, 2100.0),
        person("c2", "Iowa", Gender::Female, 7, 2200.0),
    ]);
    vec![
        parent,
        person("p2", "Alabama", Gender::Male, 21, 5000.0),
        person("p3", "Ohio", Gender::Male, 39, 7000.0),
    ]
}

fn record_ids<'a>(rows: &[ViewRow<'a>]) -> Vec<&'a str> {
    rows.iter()
        .filter_map(|row| match row {
            ViewRow::Record { person, .. } => Some(person.id.as_str()),
            ViewRow::Group(_) => None,
        })
        .collect()
}

#[test]
fn person_serializes_with_camel_case_and_no_sub_rows() {
    let person = Person {
        id: "V1StGXR8_Z".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        age: 36,
        gender: Gender::Female,
        state: "Ohio".to_string(),
        salary: 4200.5,
        sub_rows: None,
    };
    insta::assert_json_snapshot!(person, @r#"
    {
      "id": "V1StGXR8_Z",
      "firstName": "Ada",
      "lastName": "Lovelace",
      "age": 36,
      "gender": "Female",
      "state": "Ohio",
      "salary": 4200.5
    }
    "#);
}

#[test]
fn forest_round_trips_through_json() {
    let forest = sample_forest();
    let json = serde_json::to_string(&forest).expect("serialize forest");
    assert!(json.contains("\"subRows\""));
    let round: Vec<Person> = serde_json::from_str(&json).expect("deserialize forest");
    assert_eq!(round, forest);
}

#[test]
fn expanded_view_lists_children_under_parent() {
    let forest = sample_forest();
    let options = TableOptions::default().with_sort(None);
    let view = TableView::build(&forest, &options);
    let rows = view.page(0);
    assert_eq!(record_ids(&rows), vec!["p1", "c1", "c2", "p2", "p3"]);

    let depths: Vec<usize> = rows
        .iter()
        .filter_map(|row| match row {
            ViewRow::Record { depth, .. } => Some(*depth),
            ViewRow::Group(_) => None,
        })
        .collect();
    assert_eq!(depths, vec![0, 1, 1, 0, 0]);

    let collapsed = TableView::build(&forest, &options.with_expanded(false));
    assert_eq!(record_ids(&collapsed.page(0)), vec!["p1", "p2", "p3"]);
}

#[test]
fn child_rows_carry_parent_index() {
    let forest = sample_forest();
    let view = TableView::build(&forest, &TableOptions::default().with_sort(None));
    let child_index = view.page(0).into_iter().find_map(|row| match row {
        ViewRow::Record { index, person, .. } if person.id == "c2" => Some(index),
        _ => None,
    });
    assert_eq!(child_index, Some(0));
}

#[test]
fn descending_salary_sort() {
    let forest = sample_forest();
    let options =
        TableOptions::default().with_sort(Some(SortSpec::descending(ColumnId::Salary)));
    let view = TableView::build(&forest, &options.with_expanded(false));
    assert_eq!(record_ids(&view.page(0)), vec!["p3", "p2", "p1"]);
}

#[test]
fn global_filter_is_case_insensitive() {
    let forest = sample_forest();
    let options = TableOptions::default()
        .with_filter(Some("oHiO".to_string()))
        .with_expanded(false);
    let view = TableView::build(&forest, &options);
    assert_eq!(view.matched(), 2);
    assert_eq!(record_ids(&view.page(0)), vec!["p1", "p3"]);

    let blank = TableOptions::default().with_filter(Some("   ".to_string()));
    assert_eq!(blank.filter, None);
}

#[test]
fn grouping_by_state_aggregates_members() {
    let forest = sample_forest();
    let options = TableOptions::default()
        .with_group_by(Some(ColumnId::State))
        .expect("state is groupable")
        .with_expanded(false);
    let view = TableView::build(&forest, &options);
    assert_eq!(view.unit_count(), 2);

    let rows = view.page(0);
    let groups: Vec<_> = rows
        .iter()
        .filter_map(|row| match row {
            ViewRow::Group(group) => Some(group),
            ViewRow::Record { .. } => None,
        })
        .collect();
    assert_eq!(groups[0].value, "Alabama");
    assert_eq!(groups[0].count, 1);
    assert_eq!(groups[1].value, "Ohio");
    assert_eq!(groups[1].count, 2);

    let oldest = groups[1].aggregate(ColumnId::Age).expect("age aggregates");
    assert_eq!(oldest.aggregation, Aggregation::Max);
    assert_eq!(oldest.value, Some(39.0));
    let average = groups[1].aggregate(ColumnId::Salary).expect("salary aggregates");
    assert_eq!(average.aggregation, Aggregation::Mean);
    assert_eq!(average.value, Some(5000.0));
    assert!(groups[1].aggregate(ColumnId::State).is_none());
}

#[test]
fn pagination_splits_top_level_rows() {
    let forest: Vec<Person> = (0..120)
        .map(|i| person(&format!("r{i:03}"), "Maine", Gender::Male, 20, 3000.0))
        .collect();
    let options = TableOptions::default()
        .with_sort(None)
        .with_page_size(50)
        .expect("offered page size");
    let view = TableView::build(&forest, &options);
    assert_eq!(view.page_count(), 3);
    assert_eq!(view.page(0).len(), 50);
    assert_eq!(view.page(2).len(), 20);
    assert!(view.page(3).is_empty());
    assert_eq!(record_ids(&view.page(1))[0], "r050");
}

#[test]
fn summary_uses_top_level_records() {
    let forest = sample_forest();
    let summary = Summary::from_records(&forest);
    assert_eq!(summary.records, 3);
    assert_eq!(summary.total, total_count(&forest));
    assert_eq!(summary.total, 5);
    assert_eq!(summary.max_age, Some(39));
    assert_eq!(summary.mean_salary, Some(5000.0));

    let empty = Summary::from_records(&[]);
    assert_eq!(empty.mean_salary, None);
    assert_eq!(empty.max_age, None);
}

#[test]
fn expanded_children_count_toward_page_size() {
    let forest: Vec<Person> = (0..30)
        .map(|i| {
            let mut parent = person(&format!("p{i:02}"), "Maine", Gender::Male, 20, 3000.0);
            parent.sub_rows = Some(vec![
                person(&format!("p{i:02}a"), "Maine", Gender::Male, 2, 2000.0),
                person(&format!("p{i:02}b"), "Maine", Gender::Female, 3, 2000.0),
            ]);
            parent
        })
        .collect();
    let options = TableOptions::default().with_sort(None);

    let view = TableView::build(&forest, &options);
    assert_eq!(view.row_count(), 90);
    assert_eq!(view.page_count(), 2);
    assert_eq!(view.page(0).len(), 50);
    assert_eq!(view.page(1).len(), 40);
    // Row 50 is the second child of the 17th parent.
    assert_eq!(record_ids(&view.page(1))[0], "p16b");

    let collapsed = TableView::build(&forest, &options.with_expanded(false));
    assert_eq!(collapsed.page_count(), 1);
    assert_eq!(collapsed.page(0).len(), 30);
}

#[test]
fn grouped_pages_count_headers_and_members() {
    let forest: Vec<Person> = (0..60)
        .map(|i| {
            let state = if i % 2 == 0 { "Ohio" } else { "Utah" };
            person(&format!("r{i:02}"), state, Gender::Male, 20, 3000.0)
        })
        .collect();
    let options = TableOptions::default()
        .with_group_by(Some(ColumnId::State))
        .expect("state is groupable");

    let view = TableView::build(&forest, &options);
    assert_eq!(view.unit_count(), 2);
    assert_eq!(view.row_count(), 62);
    assert_eq!(view.page_count(), 2);
    assert_eq!(view.page(0).len(), 50);
    assert!(matches!(view.page(1)[0], ViewRow::Record { .. }));
}
