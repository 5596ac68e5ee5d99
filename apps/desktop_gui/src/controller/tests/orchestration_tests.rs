use super::*;
use client_core::{LookupTicket, PdfTarget};
use crossbeam_channel::bounded;
use shared::{
    domain::{PaperNumber, Year},
    protocol::SearchRequest,
};

const INTERVAL: Duration = Duration::from_secs(2);

#[test]
fn status_check_starts_polling_with_configured_interval() {
    assert_eq!(
        route_effect(Effect::CheckStatus, INTERVAL),
        EffectRoute::Backend(BackendCommand::StartStatusPolling { interval: INTERVAL })
    );
    assert_eq!(
        route_effect(Effect::StopStatusPolling, INTERVAL),
        EffectRoute::Backend(BackendCommand::StopStatusPolling)
    );
}

#[test]
fn requests_go_to_the_backend() {
    let request = SearchRequest {
        query: "vectors".to_string(),
        num_results: 15,
    };
    assert_eq!(
        route_effect(Effect::Search(request.clone()), INTERVAL),
        EffectRoute::Backend(BackendCommand::Search(request))
    );
    assert_eq!(
        route_effect(
            Effect::LookupMarkingSchemePage {
                ticket: LookupTicket(4),
                year: Year::from("2017"),
                question_number: 6,
            },
            INTERVAL
        ),
        EffectRoute::Backend(BackendCommand::LookupMarkingSchemePage {
            ticket: LookupTicket(4),
            year: Year::from("2017"),
            question_number: 6,
        })
    );
    assert_eq!(
        route_effect(
            Effect::NavigateViewer {
                target: PdfTarget::marking_scheme(Year::from("2017"), Some(12)),
                page: 12,
                delay: Duration::from_millis(1500),
            },
            INTERVAL
        ),
        EffectRoute::Backend(BackendCommand::ScheduleViewerNavigation {
            target: PdfTarget::marking_scheme(Year::from("2017"), Some(12)),
            page: 12,
            delay: Duration::from_millis(1500),
        })
    );
}

#[test]
fn viewer_effects_stay_local() {
    let target = PdfTarget::paper(Year::from("2017"), PaperNumber::from("2"), Some(3));
    assert_eq!(
        route_effect(Effect::LoadViewer(target.clone()), INTERVAL),
        EffectRoute::LoadViewer(target)
    );
    assert_eq!(
        route_effect(Effect::ClearViewer, INTERVAL),
        EffectRoute::ClearViewer
    );
}

#[test]
fn full_queue_reports_status_without_blocking() {
    let (tx, rx) = bounded::<BackendCommand>(1);
    let mut status = String::new();

    dispatch_backend_command(&tx, BackendCommand::LoadPapers, &mut status);
    assert!(status.is_empty());
    dispatch_backend_command(&tx, BackendCommand::StopStatusPolling, &mut status);
    assert_eq!(status, "UI command queue is full; please retry");
    assert_eq!(rx.try_recv().ok(), Some(BackendCommand::LoadPapers));

    drop(rx);
    dispatch_backend_command(&tx, BackendCommand::LoadPapers, &mut status);
    assert!(status.starts_with("Backend command processor disconnected"));
}
