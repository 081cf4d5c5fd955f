use codecraft_core::StepTimer;
use core::future::Future;
use core::time::Duration;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attach the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Step timer backed by `setTimeout`.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct BrowserTimer;

impl StepTimer for BrowserTimer {
    fn sleep(&self, delay: Duration) -> impl Future<Output = ()> {
        gloo::timers::future::sleep(delay)
    }
}
