//! End-to-end composition tests

use std::sync::Arc;

use behapi_domain::constants::*;
use behapi_domain::error::Error;
use behapi_domain::ports::{HttpClient, KeyValueClient, RequestSubscriber};
use behapi_domain::value_objects::{
    AppCredentials, HttpExchange, HttpRequest, HttpResponse, ScenarioContext,
};
use behapi_infrastructure::config::{ConfigurationSchema, RawBehapiConfig};
use behapi_infrastructure::di::{CapabilityFacts, ComposedServices, compose, compose_raw};
use behapi_providers::DebugReporter;
use behapi_providers::http::{HistoryRecorder, HttpClientFactory, ReqwestHttpClient};

fn raw() -> RawBehapiConfig {
    RawBehapiConfig::default()
        .with_base_url("http://api.test")
        .with_environment("test")
        .with_app("X", "Y")
}

fn without_templating() -> ComposedServices {
    compose_raw(raw(), &CapabilityFacts::none()).unwrap()
}

fn exchange(status: u16) -> HttpExchange {
    HttpExchange {
        request: HttpRequest::get("http://api.test/ping"),
        response: HttpResponse {
            status,
            headers: Vec::new(),
            body: String::new(),
        },
    }
}

#[test]
fn test_core_services_are_registered_without_templating() {
    let services = without_templating();
    let registry = services.registry();

    for id in [
        HTTP_CLIENT_SERVICE,
        HTTP_FACTORY_SERVICE,
        HTTP_HISTORY_SERVICE,
        KV_CLIENT_SERVICE,
        DEBUG_SERVICE,
        CLEANER_SERVICE,
    ] {
        assert!(registry.contains(id), "{id} should be registered");
    }
    assert!(!registry.contains(TEMPLATE_ENGINE_SERVICE));
    assert!(!registry.contains(TEMPLATE_LOADER_SERVICE));
    assert!(!services.wiring_plan().templating());
}

#[test]
fn test_initializer_chain_without_templating() {
    let services = without_templating();

    assert_eq!(
        services.initializer_ids(),
        [
            HTTP_INITIALIZER_SERVICE,
            KV_INITIALIZER_SERVICE,
            AUTHENTICATION_INITIALIZER_SERVICE,
        ]
    );
}

#[test]
fn test_composition_builds_nothing() {
    let services = without_templating();
    assert_eq!(services.registry().instantiated_count(), 0);
}

#[test]
fn test_services_are_shared() {
    let services = without_templating();

    let first = services.get(HTTP_CLIENT_SERVICE).unwrap();
    let second = services.get(HTTP_CLIENT_SERVICE).unwrap();
    assert!(first.ptr_eq(&second));

    let client = services.get_as::<dyn HttpClient>(HTTP_CLIENT_SERVICE).unwrap();
    assert_eq!(client.base_url(), "http://api.test");
    assert!(services.get_as::<ReqwestHttpClient>(HTTP_CLIENT_SERVICE).is_ok());
}

#[test]
fn test_client_is_built_through_the_factory_with_history() {
    let services = without_templating();

    let client = services
        .get_as::<ReqwestHttpClient>(HTTP_CLIENT_SERVICE)
        .unwrap();
    let factory = services
        .get_as::<HttpClientFactory>(HTTP_FACTORY_SERVICE)
        .unwrap();

    assert_eq!(factory.subscriber_count(), 1);
    assert_eq!(client.subscriber_count(), 1);
}

#[test]
fn test_history_limit_is_configured() {
    let mut raw = raw();
    raw.http.history_limit = 4;
    let services = compose_raw(raw, &CapabilityFacts::none()).unwrap();

    let history = services
        .get_as::<HistoryRecorder>(HTTP_HISTORY_SERVICE)
        .unwrap();
    assert_eq!(history.limit(), 4);
}

#[test]
fn test_huge_history_limit_is_accepted_and_usable() {
    let mut raw = raw();
    raw.http.history_limit = usize::MAX / 2;
    let services = compose_raw(raw, &CapabilityFacts::none()).unwrap();

    let history = services
        .get_as::<HistoryRecorder>(HTTP_HISTORY_SERVICE)
        .unwrap();
    history.record(exchange(200));
    assert_eq!(history.len(), 1);
}

#[test]
fn test_prepare_context_attaches_collaborators() {
    let services = without_templating();
    let mut context = ScenarioContext::new("users can sign in");

    services.prepare_context(&mut context).unwrap();

    let client = context.get::<dyn HttpClient>().unwrap();
    assert_eq!(client.base_url(), "http://api.test");
    assert!(context.has::<HistoryRecorder>());
    assert!(context.has::<dyn KeyValueClient>());
    assert_eq!(*context.get::<AppCredentials>().unwrap(), AppCredentials::new("X", "Y"));
}

#[test]
fn test_finish_scenario_resets_bags() {
    let services = without_templating();

    let history = services
        .get_as::<HistoryRecorder>(HTTP_HISTORY_SERVICE)
        .unwrap();
    history.record(exchange(200));
    let debug = services.get_as::<DebugReporter>(DEBUG_SERVICE).unwrap();
    debug.enable();

    let report = services.finish_scenario().unwrap();

    assert!(report.is_clean());
    assert_eq!(report.reset, vec![DEBUG_SERVICE, HTTP_HISTORY_SERVICE]);
    assert!(history.is_empty());
    assert!(!debug.is_enabled());
}

#[test]
fn test_history_sees_what_the_client_subscribers_see() {
    let services = without_templating();
    let subscriber = services
        .get_as::<dyn RequestSubscriber>(HTTP_HISTORY_SERVICE)
        .unwrap();
    let history = services
        .get_as::<HistoryRecorder>(HTTP_HISTORY_SERVICE)
        .unwrap();

    subscriber.on_exchange(&exchange(500));

    assert_eq!(history.last().unwrap().response.status, 500);
    assert!(Arc::ptr_eq(
        &services.get_as::<HistoryRecorder>(HTTP_HISTORY_SERVICE).unwrap(),
        &history
    ));
}

#[test]
fn test_unknown_service() {
    let services = without_templating();
    assert!(matches!(
        services.get("behapi.missing"),
        Err(Error::UnknownService { .. })
    ));
}

#[test]
fn test_invalid_configuration_composes_nothing() {
    let err = compose_raw(RawBehapiConfig::default(), &CapabilityFacts::detect()).unwrap_err();

    let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
    assert_eq!(fields, vec!["base_url", "app.id", "app.secret"]);
}

#[test]
fn test_invalid_kv_url_fails_on_first_use() {
    let mut raw = raw();
    raw.kv.url = "not a url".into();
    let services = compose_raw(raw, &CapabilityFacts::none()).unwrap();

    assert!(matches!(
        services.get(KV_CLIENT_SERVICE),
        Err(Error::KeyValue { .. })
    ));
    let mut context = ScenarioContext::new("kv down");
    assert!(services.prepare_context(&mut context).is_err());
}

#[cfg(feature = "templating")]
mod templating {
    use behapi_domain::ports::TemplateEngine;

    use super::*;

    #[test]
    fn test_templating_initializer_is_last() {
        let services = compose_raw(raw(), &CapabilityFacts::detect()).unwrap();

        assert!(services.wiring_plan().templating());
        assert_eq!(
            services.initializer_ids(),
            [
                HTTP_INITIALIZER_SERVICE,
                KV_INITIALIZER_SERVICE,
                AUTHENTICATION_INITIALIZER_SERVICE,
                TEMPLATE_INITIALIZER_SERVICE,
            ]
        );
        assert!(services.registry().contains(TEMPLATE_LOADER_SERVICE));
    }

    #[test]
    fn test_engine_debug_follows_environment() {
        let facts = CapabilityFacts::detect();

        let test = compose_raw(raw(), &facts).unwrap();
        let engine = test
            .get_as::<dyn TemplateEngine>(TEMPLATE_ENGINE_SERVICE)
            .unwrap();
        assert!(!engine.is_debug());

        let dev = compose(
            &ConfigurationSchema::validate(raw().with_environment("dev")).unwrap(),
            &facts,
        )
        .unwrap();
        let engine = dev
            .get_as::<dyn TemplateEngine>(TEMPLATE_ENGINE_SERVICE)
            .unwrap();
        assert!(engine.is_debug());
    }

    #[test]
    fn test_context_gets_the_engine() {
        let services = compose_raw(raw(), &CapabilityFacts::detect()).unwrap();
        let mut context = ScenarioContext::new("templated payload");

        services.prepare_context(&mut context).unwrap();

        let engine = context.get::<dyn TemplateEngine>().unwrap();
        assert_eq!(
            engine
                .render_str("{{ a }}", &serde_json::json!({ "a": 1 }))
                .unwrap(),
            "1"
        );
    }

    #[test]
    fn test_templating_can_be_switched_off() {
        let facts = CapabilityFacts::detect().with_templating(false);
        let services = compose_raw(raw(), &facts).unwrap();

        assert_eq!(services.initializer_ids().len(), 3);
        assert!(!services.registry().contains(TEMPLATE_ENGINE_SERVICE));
    }
}
