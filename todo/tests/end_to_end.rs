//! Full user sessions driven through the store.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;
use tasklist_runtime::StoreError;
use tasklist_testing::{test_clock, SequentialIdGenerator};
use todo_list::{
    Filter, TodoAction, TodoEnvironment, TodoError, TodoId, TodoReducer, TodoRef, TodoState,
    TodoStore, TodoView,
};

fn store() -> TodoStore {
    TodoStore::new(
        TodoState::new(),
        TodoReducer::new(),
        TodoEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new())),
    )
}

fn visible(view: &TodoView) -> Vec<(&str, bool)> {
    view.visible
        .iter()
        .map(|todo| (todo.text.as_str(), todo.completed))
        .collect()
}

async fn view(store: &TodoStore) -> TodoView {
    store.state(|state| TodoView::from(state)).await
}

async fn send(store: &TodoStore, action: TodoAction) {
    store.send(action).await.unwrap();
}

fn set_filter(value: &str) -> TodoAction {
    TodoAction::SetFilter {
        value: value.to_string(),
    }
}

#[tokio::test]
async fn buy_milk_session() {
    let store = store();

    let start = view(&store).await;
    assert!(start.visible.is_empty());
    assert_eq!(start.filter, Filter::All);

    send(
        &store,
        TodoAction::SetDraftText {
            text: "Buy milk".to_string(),
        },
    )
    .await;
    send(&store, TodoAction::AddTodo).await;

    let added = view(&store).await;
    assert_eq!(visible(&added), [("Buy milk", false)]);
    assert_eq!(added.draft_text, "");

    send(
        &store,
        TodoAction::ToggleCompleted {
            target: TodoRef::Index(0),
        },
    )
    .await;
    assert_eq!(visible(&view(&store).await), [("Buy milk", true)]);

    send(&store, set_filter("active")).await;
    assert!(view(&store).await.visible.is_empty());

    send(&store, set_filter("completed")).await;
    assert_eq!(visible(&view(&store).await), [("Buy milk", true)]);

    send(&store, TodoAction::ClearCompleted).await;
    let cleared = view(&store).await;
    assert!(cleared.visible.is_empty());
    assert_eq!(cleared.total, 0);
}

#[tokio::test]
async fn toggling_by_id_under_a_filter_hits_the_right_item() {
    let store = store();
    for text in ["first", "second", "third"] {
        send(
            &store,
            TodoAction::SetDraftText {
                text: text.to_string(),
            },
        )
        .await;
        send(&store, TodoAction::AddTodo).await;
    }
    send(
        &store,
        TodoAction::ToggleCompleted {
            target: TodoRef::Index(0),
        },
    )
    .await;
    send(&store, set_filter("active")).await;

    // "third" is second in the filtered view but third in storage
    let shown = view(&store).await;
    let third = shown.visible[1].clone();
    assert_eq!(third.text, "third");
    assert_eq!(third.index, 2);

    send(
        &store,
        TodoAction::ToggleCompleted {
            target: TodoRef::Id(third.id),
        },
    )
    .await;

    let after = view(&store).await;
    assert_eq!(visible(&after), [("second", false)]);
    assert_eq!(after.completed_count, 2);
}

#[tokio::test]
async fn rejected_commands_leave_list_untouched() {
    let store = store();
    send(
        &store,
        TodoAction::SetDraftText {
            text: "keep".to_string(),
        },
    )
    .await;
    send(&store, TodoAction::AddTodo).await;
    send(
        &store,
        TodoAction::SetDraftText {
            text: "half-typed".to_string(),
        },
    )
    .await;

    let before = store.state(Clone::clone).await;
    let missing = TodoId::from_uuid(SequentialIdGenerator::nth(42));

    for (action, expected) in [
        (
            TodoAction::RemoveTodo {
                target: TodoRef::Index(3),
            },
            TodoError::OutOfRange { index: 3, len: 1 },
        ),
        (
            TodoAction::ToggleCompleted {
                target: TodoRef::Id(missing),
            },
            TodoError::UnknownTodo { id: missing },
        ),
        (
            set_filter("done"),
            TodoError::InvalidFilter {
                value: "done".to_string(),
            },
        ),
    ] {
        let state = store.send_with(action, Clone::clone).await.unwrap();

        assert_eq!(state.last_error(), Some(&expected));
        assert_eq!(state.items(), before.items());
        assert_eq!(state.draft_text(), "half-typed");
        assert_eq!(state.filter(), before.filter());
    }
}

#[tokio::test]
async fn shutdown_stops_accepting_commands() {
    let store = store();
    store.shutdown(Duration::from_millis(100)).await.unwrap();

    let result = store.send(TodoAction::ClearCompleted).await;

    assert_eq!(result, Err(StoreError::ShutdownInProgress));
}
