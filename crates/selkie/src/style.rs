//! Conditional, state-dependent style resolution.
//!
//! A [`StyleDefinition`] owns an ordered list of conditional property blocks and the
//! parent definitions it extends. Resolution for a given [`State`] happens at most
//! once per definition: the result is cached in a `State`-keyed ordered map and shared
//! with callers as an [`Rc<StyleInstance>`].
//!
//! The expression-evaluation engine is an external collaborator behind the
//! [`Evaluator`] trait. [`BasicEvaluator`] covers plain `${dotted.path}` bindings so
//! the crate is usable standalone; a full expression language is out of scope.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::state::State;

/// A scope-chained data-binding context.
///
/// Lookups walk the chain from the innermost scope outward. Child scopes (e.g. the
/// state scope produced by [`State::extend`]) borrow their parent and never outlive a
/// single resolution call.
#[derive(Debug, Default)]
pub struct Context<'a> {
    parent: Option<&'a Context<'a>>,
    values: Map<String, Value>,
}

impl<'a> Context<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: Map<String, Value>) -> Self {
        Self {
            parent: None,
            values,
        }
    }

    /// Creates a child scope whose bindings shadow this scope's.
    pub fn extend_with(&'a self, values: Map<String, Value>) -> Context<'a> {
        Context {
            parent: Some(self),
            values,
        }
    }

    pub fn put(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Looks up a top-level binding, innermost scope first.
    pub fn opt(&self, name: &str) -> Option<&Value> {
        self.values
            .get(name)
            .or_else(|| self.parent.and_then(|p| p.opt(name)))
    }

    /// Resolves a dotted path (`"state.pressed"`): the first segment through the
    /// scope chain, the rest through object members.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.opt(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }
}

/// The expression-engine collaborator seam.
pub trait Evaluator {
    /// Resolves data-binding expressions in `value` against `ctx`. Non-expression
    /// values pass through unchanged.
    fn evaluate(&self, value: &Value, ctx: &Context) -> Value;

    /// Truthiness of an evaluated value, used for `when` guards.
    fn is_truthy(&self, value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        }
    }
}

/// Minimal evaluator: `${dotted.path}` lookups only.
///
/// A string that is exactly one `${...}` expression resolves to the bound value with
/// its type preserved; embedded expressions are substituted textually. Unresolvable
/// bindings become `null` (whole-string) or an empty substitution.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicEvaluator;

impl Evaluator for BasicEvaluator {
    fn evaluate(&self, value: &Value, ctx: &Context) -> Value {
        let Value::String(s) = value else {
            return value.clone();
        };
        if let Some(inner) = s.strip_prefix("${").and_then(|r| r.strip_suffix('}')) {
            if !inner.contains('$') && !inner.contains('}') {
                return ctx.resolve(inner).cloned().unwrap_or(Value::Null);
            }
        }
        if !s.contains("${") {
            return value.clone();
        }

        let mut out = String::new();
        let mut rest = s.as_str();
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find('}') else {
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };
            match ctx.resolve(&after[..end]) {
                Some(Value::String(v)) => out.push_str(v),
                Some(Value::Null) | None => {}
                Some(other) => out.push_str(&other.to_string()),
            }
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Value::String(out)
    }
}

/// An immutable resolved-style snapshot: property values plus a parallel,
/// independently-keyed provenance map. Provenance is diagnostic only, and a value
/// may be present with no provenance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleInstance {
    values: FxHashMap<String, Value>,
    sources: FxHashMap<String, String>,
}

impl StyleInstance {
    pub fn at(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Tries candidate names in order and returns the first that resolves. Used for
    /// property aliasing upstream.
    pub fn at_any(&self, names: &[&str]) -> Option<&Value> {
        names.iter().find_map(|name| self.values.get(*name))
    }

    pub fn provenance(&self, name: &str) -> Option<&str> {
        self.sources.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A named style: ordered conditional blocks, ordered parents, and the per-state
/// instance cache.
///
/// Definitions are built once per document load and shared read-only by every
/// component using the style; only the cache is populated afterwards. The cache is
/// single-threaded (`RefCell`), so hosts calling [`StyleDefinition::get`] from
/// multiple threads must synchronize externally.
#[derive(Debug, Default)]
pub struct StyleDefinition {
    provenance: String,
    blocks: Vec<Map<String, Value>>,
    extends: Vec<Rc<StyleDefinition>>,
    cache: RefCell<BTreeMap<State, Rc<StyleInstance>>>,
}

impl StyleDefinition {
    pub fn new(provenance: impl Into<String>) -> Self {
        Self {
            provenance: provenance.into(),
            ..Self::default()
        }
    }

    /// Builds a definition from a document-JSON style object.
    ///
    /// The reserved `"values"` (or legacy `"value"`) key holds either a single block
    /// object or an array of blocks. Non-object entries are skipped, since externally
    /// authored documents routinely contain junk and a malformed block is not worth
    /// failing the whole style over. Only a non-object style definition is an error.
    pub fn from_value(provenance: impl Into<String>, value: &Value) -> Result<Self> {
        let provenance = provenance.into();
        let Some(obj) = value.as_object() else {
            return Err(Error::InvalidStyleDefinition {
                path: provenance,
                message: "expected an object".to_string(),
            });
        };
        let mut def = Self::new(provenance);
        match obj.get("values").or_else(|| obj.get("value")) {
            Some(Value::Array(blocks)) => {
                for block in blocks {
                    if let Some(map) = block.as_object() {
                        def.blocks.push(map.clone());
                    }
                }
            }
            Some(Value::Object(map)) => def.blocks.push(map.clone()),
            Some(_) | None => {}
        }
        Ok(def)
    }

    pub fn provenance(&self) -> &str {
        &self.provenance
    }

    /// Appends a conditional block. Later blocks win over earlier ones.
    pub fn add_block(&mut self, block: Map<String, Value>) {
        self.blocks.push(block);
    }

    /// Appends a parent this style extends. Later parents win over earlier ones;
    /// own blocks win over all parents.
    pub fn add_parent(&mut self, parent: Rc<StyleDefinition>) {
        self.extends.push(parent);
    }

    /// Resolves this style for `state`, evaluating conditional blocks at most once
    /// per distinct state and returning the cached instance thereafter.
    pub fn get(&self, evaluator: &dyn Evaluator, ctx: &Context, state: State) -> Rc<StyleInstance> {
        if let Some(hit) = self.cache.borrow().get(&state) {
            return Rc::clone(hit);
        }
        debug!(style = %self.provenance, state = %state, "style cache miss");

        let mut instance = StyleInstance::default();

        // Parents first, in declaration order; later parents overwrite earlier ones.
        for parent in &self.extends {
            let resolved = parent.get(evaluator, ctx, state);
            for (name, value) in &resolved.values {
                instance.values.insert(name.clone(), value.clone());
                match resolved.sources.get(name) {
                    Some(source) => {
                        instance.sources.insert(name.clone(), source.clone());
                    }
                    None => {
                        instance.sources.remove(name);
                    }
                }
            }
        }

        // Own blocks, in declaration order, against the state-extended scope.
        let state_ctx = state.extend(ctx);
        for (index, block) in self.blocks.iter().enumerate() {
            if let Some(when) = block.get("when") {
                let guard = evaluator.evaluate(when, &state_ctx);
                if !evaluator.is_truthy(&guard) {
                    continue;
                }
            }
            for (name, value) in block {
                if name == "when" || name == "description" {
                    continue;
                }
                instance
                    .values
                    .insert(name.clone(), evaluator.evaluate(value, &state_ctx));
                instance
                    .sources
                    .insert(name.clone(), format!("{}/values[{index}]", self.provenance));
            }
        }

        let instance = Rc::new(instance);
        self.cache
            .borrow_mut()
            .insert(state, Rc::clone(&instance));
        instance
    }
}
