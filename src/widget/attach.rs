use crate::config::WidgetConfig;
use crate::lookup::LookupDispatch;
use crate::widget::controller::SuggestionSearch;
use crate::widget::element::{InputElement, SearchField, select};
use tracing::debug;

/// Builds one controller per element. Every controller gets its own results
/// container and its own dispatcher from `make_dispatch`; only the config is
/// shared.
pub fn attach<E, D>(
    elements: impl IntoIterator<Item = E>,
    config: &WidgetConfig,
    mut make_dispatch: impl FnMut() -> D,
) -> Vec<SuggestionSearch<E, D>>
where
    E: SearchField,
    D: LookupDispatch,
{
    elements
        .into_iter()
        .map(|element| {
            debug!(field = element.id(), "attaching suggestion search");
            SuggestionSearch::new(element, config.clone(), make_dispatch())
        })
        .collect()
}

/// [`attach`] restricted to the elements matching `selector`.
pub fn attach_matching<D: LookupDispatch>(
    elements: impl IntoIterator<Item = InputElement>,
    selector: &str,
    config: &WidgetConfig,
    make_dispatch: impl FnMut() -> D,
) -> Vec<SuggestionSearch<InputElement, D>> {
    attach(select(elements, selector), config, make_dispatch)
}

#[cfg(test)]
mod tests {
    use super::{attach, attach_matching};
    use crate::config::WidgetConfig;
    use crate::core::markup::ListFormatter;
    use crate::widget::controller::testing::ScriptedDispatch;
    use crate::widget::element::{InputElement, SearchField};

    #[test]
    fn each_element_gets_independent_state() {
        let config = WidgetConfig::new()
            .with_endpoint("/default")
            .with_formatter(ListFormatter);
        let mut searches = attach(
            vec![
                InputElement::new("first"),
                InputElement::new("second").with_data("endpoint", "/second"),
            ],
            &config,
            ScriptedDispatch::default,
        );
        assert_eq!(searches.len(), 2);
        assert_eq!(searches[0].endpoint(), Some("/default"));
        assert_eq!(searches[1].endpoint(), Some("/second"));

        searches[0].trigger_lookup("abc");
        let run_id = searches[0].in_flight().expect("in flight").run_id;
        searches[0].dispatcher_mut().respond(run_id, &["abcd"]);
        searches[0].tick(std::time::Instant::now());

        assert_eq!(searches[0].container().items().len(), 1);
        assert!(searches[1].container().is_empty());
        assert!(searches[1].dispatcher().dispatched.is_empty());
    }

    #[test]
    fn selector_limits_attachment() {
        let searches = attach_matching(
            vec![
                InputElement::new("a").with_class("suggestions-search"),
                InputElement::new("b"),
            ],
            ".suggestions-search",
            &WidgetConfig::default(),
            ScriptedDispatch::default,
        );
        let ids = searches
            .iter()
            .map(|s| s.element().id().to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a"]);
    }
}
