use proptest::prelude::*;

use hacker_stories_tui::config::AppConfig;
use hacker_stories_tui::internal::last_searches::last_searches;
use hacker_stories_tui::internal::models::Story;
use hacker_stories_tui::internal::stories::{StoriesAction, StoriesState, reduce};
use hacker_stories_tui::internal::ui::sort::{SortKey, SortState};
use hacker_stories_tui::internal::ui::view::calculate_wrapped_title;

const ENDPOINT: &str = "https://hn.algolia.com/api/v1/search?query=";

fn story_strategy() -> impl Strategy<Value = Story> {
    (
        "[a-z0-9]{1,8}",
        "[a-zA-Z0-9 ]{0,40}",
        "[a-z]{1,10}",
        0u32..10_000,
        -100i32..10_000,
    )
        .prop_map(|(id, title, author, num_comments, points)| Story {
            url: format!("https://example.com/{}", id),
            object_id: id,
            title,
            author,
            num_comments,
            points,
        })
}

fn action_strategy() -> impl Strategy<Value = StoriesAction> {
    prop_oneof![
        Just(StoriesAction::FetchInit),
        prop::collection::vec(story_strategy(), 0..5).prop_map(StoriesAction::FetchSuccess),
        Just(StoriesAction::FetchFailure),
        story_strategy().prop_map(StoriesAction::RemoveStory),
    ]
}

proptest! {
    #[test]
    fn test_reducer_flags_never_both_set(
        actions in prop::collection::vec(action_strategy(), 0..25)
    ) {
        let mut state = StoriesState::default();
        for action in actions {
            state = reduce(state, action);
            prop_assert!(!(state.is_loading && state.is_error));
        }
    }

    #[test]
    fn test_reducer_data_untouched_by_init_and_failure(
        stories in prop::collection::vec(story_strategy(), 0..10)
    ) {
        let state = StoriesState {
            data: stories.clone(),
            is_loading: false,
            is_error: false,
        };

        let after_init = reduce(state.clone(), StoriesAction::FetchInit);
        prop_assert_eq!(&after_init.data, &stories);

        let after_failure = reduce(after_init, StoriesAction::FetchFailure);
        prop_assert_eq!(&after_failure.data, &stories);
    }

    #[test]
    fn test_remove_never_grows_data(
        stories in prop::collection::vec(story_strategy(), 0..10),
        victim in story_strategy()
    ) {
        let state = StoriesState {
            data: stories.clone(),
            is_loading: false,
            is_error: false,
        };

        let next = reduce(state, StoriesAction::RemoveStory(victim.clone()));
        prop_assert!(next.data.len() <= stories.len());
        prop_assert!(next.data.iter().all(|s| s.object_id != victim.object_id));
    }

    #[test]
    fn test_last_searches_bounded_and_collapsed(
        terms in prop::collection::vec("[a-z]{0,6}", 0..30)
    ) {
        let urls: Vec<String> = terms.iter().map(|t| format!("{}{}", ENDPOINT, t)).collect();
        let result = last_searches(&urls, ENDPOINT);

        prop_assert!(result.len() <= 5);
        for pair in result.windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }
    }

    #[test]
    fn test_sort_preserves_the_story_set(
        stories in prop::collection::vec(story_strategy(), 0..30),
        is_reverse in any::<bool>()
    ) {
        for key in [SortKey::None, SortKey::Title, SortKey::Author, SortKey::Comment, SortKey::Point] {
            let state = SortState { key, is_reverse };
            let sorted = state.apply(&stories);

            prop_assert_eq!(sorted.len(), stories.len());

            let mut expected: Vec<&str> = stories.iter().map(|s| s.object_id.as_str()).collect();
            let mut actual: Vec<&str> = sorted.iter().map(|s| s.object_id.as_str()).collect();
            expected.sort_unstable();
            actual.sort_unstable();
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_calculate_wrapped_title_no_panic(s in "\\PC*", width in 0u16..200, prefix in 0u16..50) {
        // Ensure it never panics regardless of input
        let _ = calculate_wrapped_title(&s, width, prefix);
    }

    #[test]
    fn test_config_parsing_resilience(s in "\\PC*") {
        // Fuzz the config loader with random strings
        // It should return an Err, but not panic
        let _ = ron::from_str::<AppConfig>(&s);
    }
}
