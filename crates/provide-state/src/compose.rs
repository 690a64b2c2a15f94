#![forbid(unsafe_code)]

//! The binding composer: wrapping a view component so its input props are
//! resolved from the state tree.
//!
//! [`Provided<C>`] is the wrapped form of a [`ViewComponent`]. Its
//! lifecycle is a three-state machine: unmounted, mounted (holding exactly
//! one observer [`Subscription`](crate::store::Subscription)), unmounted
//! again. While mounted, every delivered change forces a full re-render:
//! bindings are re-resolved and the merged [`RenderProps`] flow into the
//! inner component. Re-render granularity is deliberately coarse; there is
//! no per-binding invalidation.
//!
//! Bindings and the `within` scope may be plain selectors or functions of
//! the external props. The observer's resolver closure reads the props
//! at call time, so props updated between store notifications are picked
//! up by the next resolution.
//!
//! # Invariants
//!
//! 1. One live subscription per mounted wrapper; unmount releases it
//!    exactly once and is idempotent.
//! 2. The reserved `"children"` prop is forwarded separately and can never
//!    be overridden by a resolved binding.
//! 3. Resolved bindings shadow same-named external props; action props
//!    shadow both.
//! 4. Action builders run at invocation time with the props current at
//!    that moment, and their output is dispatched to the provider's store.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use im::HashMap;
use provide_state_core::{Path, Selector, SelectorMap, Value};

use crate::error::ProvideStateError;
use crate::provider::StateProvider;
use crate::store::Subscription;

/// The reserved passthrough prop name.
pub const CHILDREN_PROP: &str = "children";

/// External inputs of a wrapped component.
pub type Props = HashMap<String, Value>;

/// A renderable unit. The rendering mechanism itself is out of scope;
/// implementations receive resolved props and do whatever "render" means
/// for them.
pub trait ViewComponent {
    /// Declared name, used for the wrapper's debug name.
    fn name(&self) -> &'static str {
        "Component"
    }

    /// Render with the given resolved props.
    fn render(&mut self, props: &RenderProps);

    /// Opt-in instance-handle capability. Components that can hand out a
    /// stable handle to their instance override this; the wrapper forwards
    /// it through [`Provided::instance_handle`].
    fn handle(&self) -> Option<ComponentHandle> {
        None
    }
}

/// A stable reference to a live component instance, minted by components
/// that implement the instance-handle capability.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ComponentHandle {
    /// The component type name (e.g. `"UserBadge"`).
    pub component_type: &'static str,
    /// Instance-unique identifier.
    pub instance_id: String,
}

impl ComponentHandle {
    #[must_use]
    pub fn new(component_type: &'static str, instance_id: impl Into<String>) -> Self {
        Self {
            component_type,
            instance_id: instance_id.into(),
        }
    }

    /// Canonical string form: `"component_type::instance_id"`.
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("{}::{}", self.component_type, self.instance_id)
    }
}

impl fmt::Display for ComponentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.component_type, self.instance_id)
    }
}

// ---------------------------------------------------------------------------
// Binding declarations
// ---------------------------------------------------------------------------

/// A declared binding source: a fixed selector, or a function deriving one
/// from the current external props.
#[derive(Clone)]
pub enum Bind {
    Selector(Selector),
    FromProps(Rc<dyn Fn(&Props) -> Selector>),
}

impl Bind {
    fn resolve(&self, props: &Props) -> Path {
        match self {
            Self::Selector(selector) => selector.normalize(),
            Self::FromProps(build) => build(props).normalize(),
        }
    }
}

impl fmt::Debug for Bind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selector(selector) => f.debug_tuple("Selector").field(selector).finish(),
            Self::FromProps(_) => f.write_str("FromProps(..)"),
        }
    }
}

/// Builds a dispatchable action from the current props and call arguments.
pub type ActionBuilder = Rc<dyn Fn(&Props, &[Value]) -> Value>;

/// Declarative options for [`StateProvider::provide`]: a scope prefix,
/// named value bindings, and named action bindings.
///
/// ```ignore
/// let options = BindOptions::new()
///     .within_from_props(|props| {
///         Selector::from(vec!["users".to_owned(), props["user_id"].as_str().unwrap().to_owned()])
///     })
///     .bind("name", "info.name")
///     .action("rename", |props, args| { /* build an action Value */ });
/// ```
#[derive(Clone, Default)]
pub struct BindOptions {
    within: Option<Bind>,
    bindings: HashMap<String, Bind>,
    actions: HashMap<String, ActionBuilder>,
}

impl BindOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope every binding under this selector prefix.
    #[must_use]
    pub fn within(mut self, selector: impl Into<Selector>) -> Self {
        self.within = Some(Bind::Selector(selector.into()));
        self
    }

    /// Scope every binding under a prefix derived from the current props.
    #[must_use]
    pub fn within_from_props(mut self, build: impl Fn(&Props) -> Selector + 'static) -> Self {
        self.within = Some(Bind::FromProps(Rc::new(build)));
        self
    }

    /// Bind the prop `name` to a fixed selector.
    #[must_use]
    pub fn bind(mut self, name: impl Into<String>, selector: impl Into<Selector>) -> Self {
        self.bindings
            .insert(name.into(), Bind::Selector(selector.into()));
        self
    }

    /// Bind the prop `name` to a selector derived from the current props.
    #[must_use]
    pub fn bind_from_props(
        mut self,
        name: impl Into<String>,
        build: impl Fn(&Props) -> Selector + 'static,
    ) -> Self {
        self.bindings
            .insert(name.into(), Bind::FromProps(Rc::new(build)));
        self
    }

    /// Bind the prop `name` to an action builder. The built action is
    /// dispatched to the store when the prop is invoked.
    #[must_use]
    pub fn action(
        mut self,
        name: impl Into<String>,
        build: impl Fn(&Props, &[Value]) -> Value + 'static,
    ) -> Self {
        self.actions.insert(name.into(), Rc::new(build));
        self
    }

    /// The fully-scoped selector map for the current props: the `within`
    /// prefix joined in front of every binding's own path.
    #[must_use]
    pub fn subscriptions(&self, props: &Props) -> SelectorMap {
        let scope = self
            .within
            .as_ref()
            .map_or_else(Path::new, |within| within.resolve(props));
        self.bindings
            .iter()
            .map(|(name, bind)| {
                let path = scope.join(&bind.resolve(props));
                (name.clone(), Selector::from(path))
            })
            .collect()
    }
}

impl fmt::Debug for BindOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindOptions")
            .field("within", &self.within)
            .field("bindings", &self.bindings.len())
            .field("actions", &self.actions.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Resolved props
// ---------------------------------------------------------------------------

/// An invocable action prop. Calling it builds an action from the props
/// current at that moment plus the call arguments, and dispatches it.
#[derive(Clone)]
pub struct ActionDispatcher {
    invoke: Rc<dyn Fn(&[Value])>,
}

impl ActionDispatcher {
    fn new(invoke: impl Fn(&[Value]) + 'static) -> Self {
        Self {
            invoke: Rc::new(invoke),
        }
    }

    pub fn invoke(&self, args: &[Value]) {
        (self.invoke)(args);
    }
}

impl fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActionDispatcher(..)")
    }
}

/// One resolved prop.
#[derive(Clone, Debug)]
pub enum Prop {
    /// A value from the external props or resolved from the state tree.
    Value(Value),
    /// The binding's path was missing from the tree. Distinct from
    /// `Value(Value::Null)`.
    Missing,
    /// An invocable action binding.
    Action(ActionDispatcher),
}

impl Prop {
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_action(&self) -> Option<&ActionDispatcher> {
        match self {
            Self::Action(action) => Some(action),
            _ => None,
        }
    }
}

impl PartialEq for Prop {
    /// Values compare structurally; actions are opaque and fall back to
    /// reference identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            (Self::Missing, Self::Missing) => true,
            (Self::Action(a), Self::Action(b)) => Rc::ptr_eq(&a.invoke, &b.invoke),
            _ => false,
        }
    }
}

/// Everything a wrapped component renders with: the merged prop map plus
/// the forwarded children value.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RenderProps {
    values: HashMap<String, Prop>,
    children: Option<Value>,
}

impl RenderProps {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Prop> {
        self.values.get(name)
    }

    /// The prop as a plain value, if it resolved to one.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name).and_then(Prop::as_value)
    }

    /// The prop as an action, if it is one.
    #[must_use]
    pub fn action(&self, name: &str) -> Option<&ActionDispatcher> {
        self.values.get(name).and_then(Prop::as_action)
    }

    /// Whether the prop exists but resolved to an absent path.
    #[must_use]
    pub fn is_missing(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Prop::Missing))
    }

    #[must_use]
    pub fn children(&self) -> Option<&Value> {
        self.children.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Prop)> {
        self.values.iter()
    }
}

// ---------------------------------------------------------------------------
// The wrapped component
// ---------------------------------------------------------------------------

struct BoundState<C> {
    component: C,
    props: Props,
    children: Option<Value>,
    subscription: Option<Subscription>,
}

/// A view component wrapped with state bindings.
///
/// Lifecycle: [`mount`](Self::mount) subscribes and renders;
/// [`update_props`](Self::update_props) re-renders with fresh resolution;
/// every delivered store change re-renders; [`unmount`](Self::unmount)
/// releases the subscription. Dropping the wrapper while mounted also
/// releases it.
pub struct Provided<C: ViewComponent + 'static> {
    provider: StateProvider,
    options: Rc<BindOptions>,
    state: Rc<RefCell<BoundState<C>>>,
}

impl<C: ViewComponent + 'static> Provided<C> {
    pub(crate) fn new(provider: StateProvider, component: C, options: BindOptions) -> Self {
        Self {
            provider,
            options: Rc::new(options),
            state: Rc::new(RefCell::new(BoundState {
                component,
                props: Props::new(),
                children: None,
                subscription: None,
            })),
        }
    }

    /// Debug name: `ProvideState(<inner name>)`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("ProvideState({})", self.state.borrow().component.name())
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.state.borrow().subscription.is_some()
    }

    /// Forward the inner component's instance handle, when it implements
    /// that capability.
    #[must_use]
    pub fn instance_handle(&self) -> Option<ComponentHandle> {
        self.state.borrow().component.handle()
    }

    /// Borrow the inner component.
    pub fn with_component<R>(&self, read: impl FnOnce(&C) -> R) -> R {
        read(&self.state.borrow().component)
    }

    /// Mount: store the external props, render once, then register the
    /// observer subscription. Mounting an already-mounted wrapper is a
    /// no-op.
    ///
    /// The reserved `"children"` entry of `props` is split off and
    /// forwarded separately.
    pub fn mount(&self, props: Props) -> Result<(), ProvideStateError> {
        if self.is_mounted() {
            tracing::debug!(name = %self.display_name(), "mount on mounted wrapper ignored");
            return Ok(());
        }
        store_props(&self.state, props);
        render_bound(&self.provider, &self.options, &self.state)?;

        let resolver = {
            let weak = Rc::downgrade(&self.state);
            let options = Rc::clone(&self.options);
            move || match weak.upgrade() {
                Some(state) => {
                    let props = state.borrow().props.clone();
                    options.subscriptions(&props)
                }
                None => SelectorMap::new(),
            }
        };
        let on_change = {
            let weak = Rc::downgrade(&self.state);
            let provider = self.provider.clone();
            let options = Rc::clone(&self.options);
            move |_values: &provide_state_core::ResolvedValues| {
                if let Some(state) = weak.upgrade()
                    && let Err(error) = render_bound(&provider, &options, &state)
                {
                    tracing::warn!(%error, "re-render after store change failed");
                }
            }
        };

        let subscription = self.provider.observe(resolver, on_change)?;
        self.state.borrow_mut().subscription = Some(subscription);
        tracing::debug!(name = %self.display_name(), "mounted");
        Ok(())
    }

    /// Replace the external props. Re-renders when mounted; when
    /// unmounted, the props are stored for the next mount.
    pub fn update_props(&self, props: Props) -> Result<(), ProvideStateError> {
        store_props(&self.state, props);
        if self.is_mounted() {
            render_bound(&self.provider, &self.options, &self.state)?;
        }
        Ok(())
    }

    /// Unmount: release the subscription. Idempotent.
    pub fn unmount(&self) {
        let subscription = self.state.borrow_mut().subscription.take();
        if let Some(subscription) = subscription {
            subscription.unsubscribe();
            tracing::debug!(name = %self.display_name(), "unmounted");
        }
    }

    /// The props the component would render with right now, without
    /// rendering.
    pub fn resolved_props(&self) -> Result<RenderProps, ProvideStateError> {
        let (props, children) = {
            let state = self.state.borrow();
            (state.props.clone(), state.children.clone())
        };
        resolved_render_props(&self.provider, &self.options, &self.state, &props, children)
    }
}

impl<C: ViewComponent + 'static> fmt::Debug for Provided<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provided")
            .field("name", &self.display_name())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

fn store_props<C>(state: &Rc<RefCell<BoundState<C>>>, mut props: Props) {
    let children = props.remove(CHILDREN_PROP);
    let mut state = state.borrow_mut();
    state.props = props;
    state.children = children;
}

fn render_bound<C: ViewComponent + 'static>(
    provider: &StateProvider,
    options: &Rc<BindOptions>,
    state: &Rc<RefCell<BoundState<C>>>,
) -> Result<(), ProvideStateError> {
    let (props, children) = {
        let state = state.borrow();
        (state.props.clone(), state.children.clone())
    };
    let render_props = resolved_render_props(provider, options, state, &props, children)?;
    state.borrow_mut().component.render(&render_props);
    Ok(())
}

/// Merge external props (children stripped), resolved bindings, then
/// action dispatchers, later layers shadowing earlier ones.
fn resolved_render_props<C: ViewComponent + 'static>(
    provider: &StateProvider,
    options: &Rc<BindOptions>,
    state: &Rc<RefCell<BoundState<C>>>,
    props: &Props,
    children: Option<Value>,
) -> Result<RenderProps, ProvideStateError> {
    let selectors = options.subscriptions(props);
    let resolved = provider.select(&selectors)?;

    let mut values: HashMap<String, Prop> = props
        .iter()
        .map(|(name, value)| (name.clone(), Prop::Value(value.clone())))
        .collect();
    for (name, value) in resolved {
        values.insert(name, value.map_or(Prop::Missing, Prop::Value));
    }
    for (name, build) in options.actions.iter() {
        let dispatcher = {
            let weak = Rc::downgrade(state);
            let provider = provider.clone();
            let build = Rc::clone(build);
            ActionDispatcher::new(move |args| {
                let Some(state) = weak.upgrade() else {
                    tracing::trace!("action invoked after component dropped");
                    return;
                };
                let props = state.borrow().props.clone();
                let action = build(&props, args);
                if let Err(error) = provider.dispatch(action) {
                    tracing::warn!(%error, "action dropped");
                }
            })
        };
        values.insert(name.clone(), Prop::Action(dispatcher));
    }

    Ok(RenderProps { values, children })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::MemoryStore;
    use core::cell::RefCell;

    // ── Test components ─────────────────────────────────────────────

    /// Records every render it receives.
    #[derive(Default)]
    struct Probe {
        renders: Rc<RefCell<Vec<RenderProps>>>,
    }

    impl Probe {
        fn new() -> (Self, Rc<RefCell<Vec<RenderProps>>>) {
            let renders = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    renders: Rc::clone(&renders),
                },
                renders,
            )
        }
    }

    impl ViewComponent for Probe {
        fn name(&self) -> &'static str {
            "Probe"
        }

        fn render(&mut self, props: &RenderProps) {
            self.renders.borrow_mut().push(props.clone());
        }
    }

    /// Implements the instance-handle capability.
    struct Handled;

    impl ViewComponent for Handled {
        fn name(&self) -> &'static str {
            "Handled"
        }

        fn render(&mut self, _props: &RenderProps) {}

        fn handle(&self) -> Option<ComponentHandle> {
            Some(ComponentHandle::new("Handled", "only"))
        }
    }

    /// No name override: exercises the fallback.
    struct Anonymous;

    impl ViewComponent for Anonymous {
        fn render(&mut self, _props: &RenderProps) {}
    }

    fn user_store() -> MemoryStore {
        MemoryStore::new(Value::map([(
            "users",
            Value::map([("42", Value::map([("name", Value::from("Ada"))]))]),
        )]))
    }

    fn props(entries: &[(&str, Value)]) -> Props {
        entries
            .iter()
            .map(|(name, value)| ((*name).to_owned(), value.clone()))
            .collect()
    }

    // ── Scoped end-to-end ───────────────────────────────────────────

    #[test]
    fn scoped_binding_resolves_through_within() {
        let provider = StateProvider::new(Rc::new(user_store()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(
            probe,
            BindOptions::new().within(["users", "42"]).bind("name", "name"),
        );

        wrapped.mount(Props::new()).unwrap();
        let rendered = renders.borrow().last().cloned().unwrap();
        assert_eq!(rendered.value("name"), Some(&Value::from("Ada")));
    }

    #[test]
    fn within_from_props_reads_current_props() {
        let store = MemoryStore::new(Value::map([(
            "users",
            Value::map([
                ("1", Value::map([("name", Value::from("Grace"))])),
                ("2", Value::map([("name", Value::from("Edsger"))])),
            ]),
        )]));
        let provider = StateProvider::new(Rc::new(store.clone()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(
            probe,
            BindOptions::new()
                .within_from_props(|props| {
                    let id = props
                        .get("user_id")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_owned();
                    Selector::from(vec!["users".to_owned(), id])
                })
                .bind("name", "name"),
        );

        wrapped
            .mount(props(&[("user_id", Value::from("1"))]))
            .unwrap();
        assert_eq!(
            renders.borrow().last().unwrap().value("name"),
            Some(&Value::from("Grace"))
        );

        wrapped
            .update_props(props(&[("user_id", Value::from("2"))]))
            .unwrap();
        assert_eq!(
            renders.borrow().last().unwrap().value("name"),
            Some(&Value::from("Edsger"))
        );
    }

    // ── Re-render behavior ──────────────────────────────────────────

    #[test]
    fn store_change_re_renders_with_new_values() {
        let store = user_store();
        let provider = StateProvider::new(Rc::new(store.clone()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(
            probe,
            BindOptions::new().within(["users", "42"]).bind("name", "name"),
        );
        wrapped.mount(Props::new()).unwrap();
        assert_eq!(renders.borrow().len(), 1);

        store.replace_state(Value::map([(
            "users",
            Value::map([("42", Value::map([("name", Value::from("Lovelace"))]))]),
        )]));
        assert_eq!(renders.borrow().len(), 2);
        assert_eq!(
            renders.borrow().last().unwrap().value("name"),
            Some(&Value::from("Lovelace"))
        );
    }

    #[test]
    fn irrelevant_store_change_does_not_re_render() {
        let store = user_store();
        let provider = StateProvider::new(Rc::new(store.clone()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(
            probe,
            BindOptions::new().within(["users", "42"]).bind("name", "name"),
        );
        wrapped.mount(Props::new()).unwrap();

        store.notify();
        store.notify();
        assert_eq!(renders.borrow().len(), 1, "only the mount render");
    }

    #[test]
    fn unmount_stops_re_renders_and_is_idempotent() {
        let store = user_store();
        let provider = StateProvider::new(Rc::new(store.clone()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(
            probe,
            BindOptions::new().within(["users", "42"]).bind("name", "name"),
        );
        wrapped.mount(Props::new()).unwrap();
        assert!(wrapped.is_mounted());

        wrapped.unmount();
        wrapped.unmount();
        assert!(!wrapped.is_mounted());
        assert_eq!(store.listener_count(), 0);

        store.replace_state(Value::map([(
            "users",
            Value::map([("42", Value::map([("name", Value::from("gone"))]))]),
        )]));
        assert_eq!(renders.borrow().len(), 1);
    }

    #[test]
    fn remount_subscribes_again() {
        let store = user_store();
        let provider = StateProvider::new(Rc::new(store.clone()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(
            probe,
            BindOptions::new().within(["users", "42"]).bind("name", "name"),
        );

        wrapped.mount(Props::new()).unwrap();
        wrapped.unmount();
        wrapped.mount(Props::new()).unwrap();
        assert_eq!(store.listener_count(), 1);
        assert_eq!(renders.borrow().len(), 2);
    }

    #[test]
    fn double_mount_is_ignored() {
        let store = user_store();
        let provider = StateProvider::new(Rc::new(store.clone()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(probe, BindOptions::new().bind("name", "users.42.name"));

        wrapped.mount(Props::new()).unwrap();
        wrapped.mount(Props::new()).unwrap();
        assert_eq!(store.listener_count(), 1);
        assert_eq!(renders.borrow().len(), 1);
    }

    #[test]
    fn drop_while_mounted_releases_subscription() {
        let store = user_store();
        let provider = StateProvider::new(Rc::new(store.clone()));
        {
            let (probe, _renders) = Probe::new();
            let wrapped = provider.provide(probe, BindOptions::new().bind("name", "users.42.name"));
            wrapped.mount(Props::new()).unwrap();
            assert_eq!(store.listener_count(), 1);
        }
        assert_eq!(store.listener_count(), 0);
    }

    // ── Prop merging ────────────────────────────────────────────────

    #[test]
    fn external_props_flow_through_and_bindings_shadow() {
        let provider = StateProvider::new(Rc::new(user_store()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(
            probe,
            BindOptions::new().bind("name", "users.42.name"),
        );
        wrapped
            .mount(props(&[
                ("name", Value::from("external")),
                ("theme", Value::from("dark")),
            ]))
            .unwrap();

        let rendered = renders.borrow().last().cloned().unwrap();
        assert_eq!(
            rendered.value("name"),
            Some(&Value::from("Ada")),
            "binding shadows the same-named external prop"
        );
        assert_eq!(rendered.value("theme"), Some(&Value::from("dark")));
    }

    #[test]
    fn missing_binding_is_distinct_from_null() {
        let provider = StateProvider::new(Rc::new(MemoryStore::new(Value::map([(
            "present",
            Value::Null,
        )]))));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(
            probe,
            BindOptions::new()
                .bind("null_prop", "present")
                .bind("absent_prop", "absent"),
        );
        wrapped.mount(Props::new()).unwrap();

        let rendered = renders.borrow().last().cloned().unwrap();
        assert_eq!(rendered.value("null_prop"), Some(&Value::Null));
        assert!(rendered.is_missing("absent_prop"));
    }

    #[test]
    fn children_are_forwarded_separately() {
        let provider = StateProvider::new(Rc::new(user_store()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(probe, BindOptions::new());
        wrapped
            .mount(props(&[
                ("children", Value::from("inner content")),
                ("x", Value::from(1)),
            ]))
            .unwrap();

        let rendered = renders.borrow().last().cloned().unwrap();
        assert_eq!(rendered.children(), Some(&Value::from("inner content")));
        assert!(
            rendered.get(CHILDREN_PROP).is_none(),
            "children never appear in the prop map"
        );
        assert_eq!(rendered.value("x"), Some(&Value::from(1)));
    }

    // ── Actions ─────────────────────────────────────────────────────

    #[test]
    fn actions_dispatch_with_current_props_and_args() {
        let store = user_store();
        let provider = StateProvider::new(Rc::new(store.clone()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(
            probe,
            BindOptions::new().action("rename", |props, args| {
                Value::map([
                    ("type", Value::from("RENAME_USER")),
                    (
                        "user_id",
                        props.get("user_id").cloned().unwrap_or(Value::Null),
                    ),
                    ("name", args.first().cloned().unwrap_or(Value::Null)),
                ])
            }),
        );
        wrapped
            .mount(props(&[("user_id", Value::from("42"))]))
            .unwrap();

        let rendered = renders.borrow().last().cloned().unwrap();
        rendered
            .action("rename")
            .unwrap()
            .invoke(&[Value::from("Hopper")]);

        let dispatched = store.dispatched();
        assert_eq!(dispatched.len(), 1);
        assert_eq!(
            dispatched[0],
            Value::map([
                ("type", Value::from("RENAME_USER")),
                ("user_id", Value::from("42")),
                ("name", Value::from("Hopper")),
            ])
        );
    }

    #[test]
    fn action_shadows_binding_of_same_name() {
        let provider = StateProvider::new(Rc::new(user_store()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(
            probe,
            BindOptions::new()
                .bind("save", "users.42.name")
                .action("save", |_, _| Value::from("SAVE")),
        );
        wrapped.mount(Props::new()).unwrap();

        let rendered = renders.borrow().last().cloned().unwrap();
        assert!(rendered.action("save").is_some());
    }

    // ── Names and handles ───────────────────────────────────────────

    #[test]
    fn display_name_wraps_inner_name() {
        let provider = StateProvider::new(Rc::new(user_store()));
        let (probe, _renders) = Probe::new();
        let wrapped = provider.provide(probe, BindOptions::new());
        assert_eq!(wrapped.display_name(), "ProvideState(Probe)");
    }

    #[test]
    fn display_name_falls_back_to_component() {
        let provider = StateProvider::new(Rc::new(user_store()));
        let wrapped = provider.provide(Anonymous, BindOptions::new());
        assert_eq!(wrapped.display_name(), "ProvideState(Component)");
    }

    #[test]
    fn handle_is_forwarded_only_when_capable() {
        let provider = StateProvider::new(Rc::new(user_store()));

        let with_handle = provider.provide(Handled, BindOptions::new());
        assert_eq!(
            with_handle.instance_handle(),
            Some(ComponentHandle::new("Handled", "only"))
        );

        let without = provider.provide(Anonymous, BindOptions::new());
        assert_eq!(without.instance_handle(), None);
    }

    #[test]
    fn component_handle_canonical_form() {
        let handle = ComponentHandle::new("UserBadge", "header");
        assert_eq!(handle.canonical(), "UserBadge::header");
        assert_eq!(handle.to_string(), "UserBadge::header");
    }

    // ── resolved_props ──────────────────────────────────────────────

    #[test]
    fn resolved_props_without_rendering() {
        let provider = StateProvider::new(Rc::new(user_store()));
        let (probe, renders) = Probe::new();
        let wrapped = provider.provide(
            probe,
            BindOptions::new().within("users.42").bind("name", "name"),
        );
        wrapped.update_props(Props::new()).unwrap();

        let resolved = wrapped.resolved_props().unwrap();
        assert_eq!(resolved.value("name"), Some(&Value::from("Ada")));
        assert!(renders.borrow().is_empty(), "no render while unmounted");
    }

    // ── Subscription resolution ─────────────────────────────────────

    #[test]
    fn subscriptions_join_scope_and_binding() {
        let options = BindOptions::new()
            .within("users.42")
            .bind("name", "info.name");
        let map = options.subscriptions(&Props::new());
        assert_eq!(
            map.get("name").map(Selector::normalize),
            Some(Path::from_segments(["users", "42", "info", "name"]))
        );
    }

    #[test]
    fn empty_within_leaves_binding_paths_alone() {
        let options = BindOptions::new().bind("title", "app.title");
        let map = options.subscriptions(&Props::new());
        assert_eq!(
            map.get("title").map(Selector::normalize),
            Some(Path::from_segments(["app", "title"]))
        );
    }
}
