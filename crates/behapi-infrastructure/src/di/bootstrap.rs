//! Composition root
//!
//! Turns a validated configuration into a [`ComposedServices`]:
//!
//! ```text
//! CompositionConfig ──► loaders (debug, http, kv, cleaner, initializers,
//!                        templating when the plan allows it)
//!                             │
//!                             ▼
//!                       ServiceRegistry ──► process() ──► ComposedServices
//!                                           ├─ initializer chain
//!                                           └─ add_bag calls on the cleaner
//! ```
//!
//! Nothing is instantiated here; services are built on first request.
//!
//! ## Services
//!
//! | Identifier | Provides | Tags |
//! |------------|----------|------|
//! | `behapi.debug` | `DebugReporter`, `dyn ResettableBag` | bag, reset |
//! | `behapi.http.history` | `HistoryRecorder`, `dyn RequestSubscriber`, `dyn ResettableBag` | bag, reset |
//! | `behapi.http.factory` | `HttpClientFactory` | |
//! | `behapi.http.client` | `ReqwestHttpClient`, `dyn HttpClient` | |
//! | `behapi.kv.client` | `RedisKeyValueClient`, `dyn KeyValueClient` | |
//! | `behapi.subscriber.cleaner` | `ResetCoordinator` | |
//! | `behapi.initializer.*` | `dyn ContextInitializer` | context initializer |
//! | `behapi.templating.loader` | `TemplateLoaderChain` | |
//! | `behapi.templating` | `TeraTemplateEngine`, `dyn TemplateEngine` | |

use std::sync::Arc;

use behapi_domain::constants::*;
use behapi_domain::error::{Error, Result};
use behapi_domain::ports::{
    ContextInitializer, HttpClient, KeyValueClient, RequestSubscriber, ResettableBag,
};
use behapi_providers::DebugReporter;
use behapi_providers::http::{HistoryRecorder, HttpClientFactory, HttpClientOptions};
use behapi_providers::initializers::{
    AuthenticationInitializer, HttpInitializer, KeyValueInitializer,
};
use behapi_providers::kv::RedisKeyValueClient;
use tracing::{debug, info};

use super::conditional::{CapabilityFacts, WiringPlan};
use super::descriptor::{Argument, MethodCall, ServiceDescriptor, Tag};
use super::instance::Instance;
use super::lifecycle::{ComposedServices, InitializerChain, ResetCoordinator};
use super::registry::ServiceRegistry;
use super::tags::{TaggedCollector, attribute_is_true};
use crate::config::{CompositionConfig, ConfigurationSchema, RawBehapiConfig};

/// Compose every service described by `config`
///
/// Optional services are wired according to `facts`.
pub fn compose(config: &CompositionConfig, facts: &CapabilityFacts) -> Result<ComposedServices> {
    info!(
        environment = %config.environment,
        base_url = %config.base_url,
        "Composing behapi services"
    );
    let plan = WiringPlan::from_facts(facts);
    let mut registry = ServiceRegistry::new();

    load_debug(&mut registry, config)?;
    load_http(&mut registry, config)?;
    load_kv(&mut registry, config)?;
    register_cleaner(&mut registry)?;
    load_initializers(&mut registry, config)?;
    if plan.templating() {
        load_templating(&mut registry, config)?;
    } else {
        info!("Templating engine not available, its services are not wired");
    }

    let services = process(registry, plan)?;
    info!(
        services = services.registry().len(),
        initializers = services.initializer_ids().len(),
        "Composition finished"
    );
    Ok(services)
}

/// Validate `raw`, then compose
///
/// An invalid block fails before any service is registered.
pub fn compose_raw(raw: RawBehapiConfig, facts: &CapabilityFacts) -> Result<ComposedServices> {
    let config = ConfigurationSchema::validate(raw)?;
    compose(&config, facts)
}

/// Composition pass over a fully registered `registry`
///
/// Collects the initializer chain and hands the identifier of every bag
/// tagged `reset = true` to the cleaner. Bags are not built here nor when the
/// cleaner is built. The cleaner must be registered.
pub fn process(mut registry: ServiceRegistry, plan: WiringPlan) -> Result<ComposedServices> {
    let initializers = InitializerChain::collect(&registry);
    debug!(chain = ?initializers.ids(), "Initializer chain collected");

    let bags = TaggedCollector::new(BAG_TAG)
        .with_predicate(attribute_is_true(BAG_RESET_ATTRIBUTE))
        .collect_ids(&registry);

    let cleaner = registry.descriptor_mut(CLEANER_SERVICE)?;
    for bag in bags {
        debug!(bag = %bag, "Bag will be reset after each scenario");
        cleaner.add_method_call(MethodCall::new(
            "add_bag",
            vec![Argument::value(bag)],
            |target, args| {
                downcast::<ResetCoordinator>(target, CLEANER_SERVICE)?
                    .add_bag(args.value::<String>(0)?)
            },
        ));
    }

    Ok(ComposedServices::new(registry, initializers, plan))
}

/// Register the cleaner under its well-known identifier
pub fn register_cleaner(registry: &mut ServiceRegistry) -> Result<()> {
    registry.register(
        CLEANER_SERVICE,
        ServiceDescriptor::construct(|_| Ok(Instance::new(ResetCoordinator::new()))),
    )
}

fn reset_bag() -> Tag {
    Tag::new(BAG_TAG).with_attribute(BAG_RESET_ATTRIBUTE, true)
}

fn context_initializer() -> Tag {
    Tag::new(CONTEXT_INITIALIZER_TAG)
}

fn downcast<T: Send + Sync + 'static>(instance: &Instance, id: &str) -> Result<Arc<T>> {
    instance
        .get::<T>()
        .ok_or_else(|| Error::service_type(id, std::any::type_name::<T>()))
}

fn initializer<T>(initializer: T) -> Instance
where
    T: ContextInitializer + 'static,
{
    let initializer = Arc::new(initializer);
    Instance::from_arc(initializer.clone()).provide::<dyn ContextInitializer>(initializer)
}

fn load_debug(registry: &mut ServiceRegistry, config: &CompositionConfig) -> Result<()> {
    registry.register(
        DEBUG_SERVICE,
        ServiceDescriptor::construct(|args| {
            let reporter = Arc::new(DebugReporter::new(&args.value::<String>(0)?));
            Ok(Instance::from_arc(reporter.clone()).provide::<dyn ResettableBag>(reporter))
        })
        .with_value(config.debug_formatter.clone())
        .with_tag(reset_bag()),
    )
}

fn load_http(registry: &mut ServiceRegistry, config: &CompositionConfig) -> Result<()> {
    registry.register(
        HTTP_HISTORY_SERVICE,
        ServiceDescriptor::construct(|args| {
            let history = Arc::new(HistoryRecorder::new(args.value(0)?));
            Ok(Instance::from_arc(history.clone())
                .provide::<dyn RequestSubscriber>(history.clone())
                .provide::<dyn ResettableBag>(history))
        })
        .with_value(config.http.history_limit)
        .with_tag(reset_bag()),
    )?;

    registry.register(
        HTTP_FACTORY_SERVICE,
        ServiceDescriptor::construct(|_| Ok(Instance::new(HttpClientFactory::new())))
            .with_method_call(
                "add_subscriber",
                vec![Argument::reference(HTTP_HISTORY_SERVICE)],
                |factory, args| {
                    downcast::<HttpClientFactory>(factory, HTTP_FACTORY_SERVICE)?
                        .add_subscriber(args.service::<dyn RequestSubscriber>(0)?)
                },
            ),
    )?;

    registry.register(
        HTTP_CLIENT_SERVICE,
        ServiceDescriptor::from_factory(HTTP_FACTORY_SERVICE, "build_client", |factory, args| {
            let options: HttpClientOptions = args.value(0)?;
            let client = Arc::new(
                downcast::<HttpClientFactory>(factory, HTTP_FACTORY_SERVICE)?
                    .build_client(&options)?,
            );
            Ok(Instance::from_arc(client.clone()).provide::<dyn HttpClient>(client))
        })
        .with_argument(Argument::serialized(&config.http_client_options())?),
    )
}

fn load_kv(registry: &mut ServiceRegistry, config: &CompositionConfig) -> Result<()> {
    registry.register(
        KV_CLIENT_SERVICE,
        ServiceDescriptor::construct(|args| {
            let client = Arc::new(RedisKeyValueClient::new(&args.value::<String>(0)?)?);
            Ok(Instance::from_arc(client.clone()).provide::<dyn KeyValueClient>(client))
        })
        .with_value(config.kv.url.clone()),
    )
}

fn load_initializers(registry: &mut ServiceRegistry, config: &CompositionConfig) -> Result<()> {
    registry.register(
        HTTP_INITIALIZER_SERVICE,
        ServiceDescriptor::construct(|args| {
            Ok(initializer(HttpInitializer::new(
                args.service::<dyn HttpClient>(0)?,
                args.service::<HistoryRecorder>(1)?,
            )))
        })
        .with_reference(HTTP_CLIENT_SERVICE)
        .with_reference(HTTP_HISTORY_SERVICE)
        .with_tag(context_initializer()),
    )?;

    registry.register(
        KV_INITIALIZER_SERVICE,
        ServiceDescriptor::construct(|args| {
            Ok(initializer(KeyValueInitializer::new(
                args.service::<dyn KeyValueClient>(0)?,
            )))
        })
        .with_reference(KV_CLIENT_SERVICE)
        .with_tag(context_initializer()),
    )?;

    registry.register(
        AUTHENTICATION_INITIALIZER_SERVICE,
        ServiceDescriptor::construct(|args| {
            Ok(initializer(AuthenticationInitializer::new(
                args.value::<String>(0)?,
                args.value::<String>(1)?,
            )))
        })
        .with_value(config.app.id.clone())
        .with_value(config.app.secret.clone())
        .with_tag(context_initializer()),
    )
}

#[cfg(feature = "templating")]
fn load_templating(registry: &mut ServiceRegistry, config: &CompositionConfig) -> Result<()> {
    use behapi_domain::ports::TemplateEngine;
    use behapi_providers::initializers::TemplatingInitializer;
    use behapi_providers::templating::{TemplateLoaderChain, TemplateOptions, TeraTemplateEngine};

    registry.register(
        TEMPLATE_LOADER_SERVICE,
        ServiceDescriptor::construct(|_| Ok(Instance::new(TemplateLoaderChain::new()))),
    )?;

    registry.register(
        TEMPLATE_ENGINE_SERVICE,
        ServiceDescriptor::construct(|args| {
            let loader = args.service::<TemplateLoaderChain>(0)?;
            let options = TemplateOptions {
                debug: args.value(1)?,
            };
            let engine = Arc::new(TeraTemplateEngine::new(&loader, options)?);
            Ok(Instance::from_arc(engine.clone()).provide::<dyn TemplateEngine>(engine))
        })
        .with_reference(TEMPLATE_LOADER_SERVICE)
        .with_value(config.environment.is_debug()),
    )?;

    registry.register(
        TEMPLATE_INITIALIZER_SERVICE,
        ServiceDescriptor::construct(|args| {
            Ok(initializer(TemplatingInitializer::new(
                args.service::<dyn TemplateEngine>(0)?,
            )))
        })
        .with_reference(TEMPLATE_ENGINE_SERVICE)
        .with_tag(context_initializer()),
    )
}

#[cfg(not(feature = "templating"))]
fn load_templating(_registry: &mut ServiceRegistry, _config: &CompositionConfig) -> Result<()> {
    Err(Error::infrastructure(
        "Templating services requested but not compiled in",
    ))
}
