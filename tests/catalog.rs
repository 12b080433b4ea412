mod common;

use std::time::Duration;

use casestudies::catalog::{Catalog, CatalogError};

use common::test_dependencies;

#[test]
fn catalog_is_grouped_like_the_case_studies() {
    let catalog = Catalog::case_studies();

    assert_eq!(catalog.title, "Case Studies");
    let headers: Vec<&str> = catalog.sections.iter().map(|section| section.header).collect();
    assert_eq!(headers, vec!["Getting started", "Effects", "Higher-order reducers"]);
    assert_eq!(catalog.sections[0].entries[0].title, "Basics");
    let effects: Vec<&str> = catalog.sections[1].entries.iter().map(|entry| entry.title).collect();
    assert_eq!(effects, vec!["Cancellation", "Long-living effects", "Timers"]);
}

#[test]
fn find_accepts_full_path_or_entry_slug() {
    let catalog = Catalog::case_studies();

    assert_eq!(catalog.find("getting-started/basics").unwrap().title, "Basics");
    assert_eq!(catalog.find("effects/timers/").unwrap().title, "Timers");
    assert_eq!(
        catalog.find("recursive-state-and-actions").unwrap().title,
        "Recursive state and actions"
    );
}

#[test]
fn unknown_entry_is_an_error() {
    let catalog = Catalog::case_studies();

    let error = catalog.find("effects/websocket").err().unwrap();
    assert_eq!(
        error,
        CatalogError::UnknownEntry {
            path: "effects/websocket".to_string()
        }
    );
}

#[tokio::test]
async fn opening_an_entry_always_starts_fresh() {
    let catalog = Catalog::case_studies();
    let dependencies = test_dependencies(&[4]);
    let entry = catalog.find("getting-started/basics").unwrap();

    let screen = (entry.open)(&dependencies);
    screen.dispatch("increment").unwrap();
    screen.dispatch("increment").unwrap();
    assert!(screen.render().contains("count: 2"));

    let reopened = (entry.open)(&dependencies);
    assert!(reopened.render().contains("count: 0"));
    assert!(screen.render().contains("count: 2"));
}

#[tokio::test]
async fn unknown_command_lists_accepted_commands() {
    let catalog = Catalog::case_studies();
    let screen = (catalog.find("getting-started/basics").unwrap().open)(&test_dependencies(&[1]));

    let error = screen.dispatch("jump").unwrap_err();

    assert_eq!(
        error,
        CatalogError::UnknownCommand {
            command: "jump".to_string(),
            usage: "increment, decrement".to_string(),
        }
    );
}

#[tokio::test]
async fn die_roll_uses_the_injected_dice() {
    let catalog = Catalog::case_studies();
    let screen = (catalog.find("higher-order-reducers/strict-reducers").unwrap().open)(
        &test_dependencies(&[5, 2]),
    );

    screen.dispatch("roll").unwrap();
    wait_until(|| screen.in_flight() == 0).await;
    assert!(screen.render().contains("die_face: 5"));

    screen.dispatch("roll").unwrap();
    wait_until(|| screen.in_flight() == 0).await;
    assert!(screen.render().contains("die_face: 2"));
}

#[tokio::test]
async fn timers_tick_with_the_immediate_scheduler() {
    let catalog = Catalog::case_studies();
    let screen = (catalog.find("effects/timers").unwrap().open)(&test_dependencies(&[1]));

    screen.dispatch("toggle").unwrap();
    wait_until(|| !screen.render().contains("seconds_elapsed: 0,")).await;
    screen.dispatch("toggle").unwrap();

    assert_eq!(screen.in_flight(), 0);
    let stopped = screen.render();
    tokio::task::yield_now().await;
    assert_eq!(screen.render(), stopped);
}

#[tokio::test]
async fn shared_state_is_visible_from_both_tabs() {
    let catalog = Catalog::case_studies();
    let screen = (catalog.find("getting-started/shared-state").unwrap().open)(&test_dependencies(&[1]));

    for command in ["increment", "increment", "decrement", "tab profile"] {
        screen.dispatch(command).unwrap();
    }
    let rendered = screen.render();
    assert!(rendered.contains("current_tab: Profile"));
    assert!(rendered.contains("number_of_counts: 3"));

    screen.dispatch("reset").unwrap();
    assert!(screen.render().contains("number_of_counts: 0"));
}

#[tokio::test]
async fn trivia_request_completes_and_fails_for_negative_counts() {
    let catalog = Catalog::case_studies();
    let screen = (catalog.find("effects/cancellation").unwrap().open)(&test_dependencies(&[1]));

    screen.dispatch("increment").unwrap();
    screen.dispatch("trivia").unwrap();
    wait_until(|| screen.in_flight() == 0).await;
    assert!(screen.render().contains("1 is a good number."));

    for command in ["decrement", "decrement", "trivia"] {
        screen.dispatch(command).unwrap();
    }
    wait_until(|| screen.in_flight() == 0).await;
    let rendered = screen.render();
    assert!(rendered.contains("Unavailable(\n"));
    assert!(rendered.contains("current_trivia: None"));
    assert!(rendered.contains("is_trivia_request_in_flight: false"));
}

#[tokio::test]
async fn notifications_count_only_while_visible() {
    let catalog = Catalog::case_studies();
    let dependencies = test_dependencies(&[1]);
    let screen = (catalog.find("effects/long-living-effects").unwrap().open)(&dependencies);

    screen.dispatch("notify").unwrap();
    screen.dispatch("appear").unwrap();
    screen.dispatch("notify").unwrap();
    dependencies.notifications.send(()).unwrap();
    wait_until(|| screen.render().contains("notification_count: 2")).await;

    screen.dispatch("disappear").unwrap();
    assert_eq!(screen.in_flight(), 0);
    screen.dispatch("notify").unwrap();
    wait_until(|| screen.in_flight() == 0).await;
    assert!(screen.render().contains("notification_count: 2"));
}

async fn wait_until(condition: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("timed out waiting for condition");
}
