use stemma_core::{
    Error, Gender, Person, PersonId, PersonIndex, RootAssertion, SolveOptions,
    descendant_generations, owning_families, visible_set,
};

fn person(id: i64, father: Option<i64>, mother: Option<i64>, spouse: Option<i64>) -> Person {
    Person {
        id: PersonId(id),
        family_id: "whiting".to_string(),
        name: format!("p{id}"),
        gender: Gender::Unknown,
        father_id: father.map(PersonId),
        mother_id: mother.map(PersonId),
        spouse_id: spouse.map(PersonId),
        birthday: None,
        marriage_date: None,
        death_date: None,
    }
}

/// Root couple 1+2, children 3/4/5, 4 married to 6, grandchild 7, and an unrelated
/// person 100 that must never become visible from these roots.
fn whiting_family() -> Vec<Person> {
    vec![
        person(1, None, None, Some(2)),
        person(2, None, None, Some(1)),
        person(3, Some(1), Some(2), None),
        person(4, Some(1), Some(2), Some(6)),
        person(5, Some(1), Some(2), None),
        person(6, None, None, Some(4)),
        person(7, Some(4), Some(6), None),
        person(100, None, None, None),
    ]
}

fn ids(set: &stemma_core::VisibleSet) -> Vec<i64> {
    let mut out: Vec<i64> = set.iter().map(|id| id.0).collect();
    out.sort_unstable();
    out
}

#[test]
fn closure_includes_descendants_and_discovered_spouses() {
    let persons = whiting_family();
    let index = PersonIndex::build(&persons).unwrap();
    let visible = visible_set(
        &index,
        [PersonId(1), PersonId(2)],
        SolveOptions::default(),
    )
    .unwrap();
    assert_eq!(ids(&visible), vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn closure_is_empty_for_absent_seeds() {
    let persons = whiting_family();
    let index = PersonIndex::build(&persons).unwrap();
    let visible = visible_set(&index, [PersonId(999)], SolveOptions::default()).unwrap();
    assert!(visible.is_empty());
}

#[test]
fn parent_cycle_terminates_and_visits_each_id_once() {
    // Data-entry error: 1 and 2 are each other's fathers.
    let persons = vec![person(1, Some(2), None, None), person(2, Some(1), None, None)];
    let index = PersonIndex::build(&persons).unwrap();
    let visible = visible_set(&index, [PersonId(1)], SolveOptions::default()).unwrap();
    assert_eq!(ids(&visible), vec![1, 2]);
}

#[test]
fn oversize_ceiling_aborts_without_partial_output() {
    let persons = whiting_family();
    let index = PersonIndex::build(&persons).unwrap();
    let err = visible_set(
        &index,
        [PersonId(1), PersonId(2)],
        SolveOptions {
            max_visited: Some(3),
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::Oversize { limit: 3 }));
}

#[test]
fn ceiling_equal_to_family_size_is_not_an_error() {
    let persons = whiting_family();
    let index = PersonIndex::build(&persons).unwrap();
    let visible = visible_set(
        &index,
        [PersonId(1), PersonId(2)],
        SolveOptions {
            max_visited: Some(7),
        },
    )
    .unwrap();
    assert_eq!(visible.len(), 7);
}

#[test]
fn owning_families_walks_up_to_the_declared_roots() {
    let persons = whiting_family();
    let index = PersonIndex::build(&persons).unwrap();
    let roots = vec![
        RootAssertion {
            family_id: "whiting".to_string(),
            father_id: Some(PersonId(1)),
            mother_id: Some(PersonId(2)),
        },
        RootAssertion {
            family_id: "other".to_string(),
            father_id: Some(PersonId(200)),
            mother_id: None,
        },
    ];

    // Grandchild 7 reaches 1/2 through 4.
    let families = owning_families(&index, PersonId(7), &roots).unwrap();
    assert_eq!(families, vec!["whiting".to_string()]);

    // Married-in 6 reaches them through the spouse hop to 4.
    let families = owning_families(&index, PersonId(6), &roots).unwrap();
    assert_eq!(families, vec!["whiting".to_string()]);

    // The unrelated person belongs to no declared pedigree.
    let families = owning_families(&index, PersonId(100), &roots).unwrap();
    assert!(families.is_empty());
}

#[test]
fn owning_families_reports_missing_person() {
    let persons = whiting_family();
    let index = PersonIndex::build(&persons).unwrap();
    let err = owning_families(&index, PersonId(999), &[]).unwrap_err();
    assert!(matches!(err, Error::PersonNotFound { id } if id == PersonId(999)));
}

#[test]
fn descendant_generations_labels_relative_to_the_requested_person() {
    let persons = whiting_family();
    let index = PersonIndex::build(&persons).unwrap();
    let labels = descendant_generations(&index, PersonId(1), SolveOptions::default()).unwrap();

    let rendered: Vec<(i64, String)> = labels
        .iter()
        .map(|(id, label)| (id.0, label.to_string()))
        .collect();

    let of = |want: i64| -> &str {
        rendered
            .iter()
            .find(|(id, _)| *id == want)
            .map(|(_, s)| s.as_str())
            .unwrap()
    };

    assert_eq!(of(1), "1");
    // The requested person's spouse has no blood-parent edge here: co-tier sub-rank.
    assert_eq!(of(2), "1.1");
    assert_eq!(of(3), "2");
    assert_eq!(of(4), "2");
    assert_eq!(of(6), "2.1");
    assert_eq!(of(7), "3");
    assert_eq!(rendered.len(), 7);
}
