use super::models::Story;

/// State owned by the stories reducer. Everything else in the app reads
/// snapshots of this and derives views; only [`reduce`] writes it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoriesState {
    pub data: Vec<Story>,
    pub is_loading: bool,
    pub is_error: bool,
}

/// Lifecycle events driving the stories state machine.
///
/// The set is closed on purpose: the reducer matches exhaustively, so an
/// "unknown action" cannot exist at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum StoriesAction {
    FetchInit,
    FetchSuccess(Vec<Story>),
    FetchFailure,
    RemoveStory(Story),
}

/// Apply one action to the state and return the next state.
///
/// Invariants: `is_loading` and `is_error` are never both true after a
/// transition, and `data` changes only on `FetchSuccess` (full replace)
/// or `RemoveStory` (filter by id).
pub fn reduce(state: StoriesState, action: StoriesAction) -> StoriesState {
    match action {
        StoriesAction::FetchInit => StoriesState {
            is_loading: true,
            is_error: false,
            ..state
        },
        StoriesAction::FetchSuccess(payload) => StoriesState {
            data: payload,
            is_loading: false,
            is_error: false,
        },
        StoriesAction::FetchFailure => StoriesState {
            is_loading: false,
            is_error: true,
            ..state
        },
        StoriesAction::RemoveStory(item) => {
            let StoriesState {
                data,
                is_loading,
                is_error,
            } = state;
            StoriesState {
                data: data
                    .into_iter()
                    .filter(|story| story.object_id != item.object_id)
                    .collect(),
                is_loading,
                is_error,
            }
        }
    }
}
