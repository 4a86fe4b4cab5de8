//! Reactive element binding and signal projection.
//!
//! At page initialization the document is scanned once for elements declaring
//! interest in the connectivity and sign-in signals. Each discovered element
//! is resolved to a closed [`ElementRole`] variant up front, so applying a
//! signal change is a lookup over a small enum rather than runtime string
//! comparison on tags and ids.
//!
//! Every bound element carries the last-applied signal values as
//! element-local state. A broadcast for a signal an element is not aware of
//! leaves it untouched; projections are computed from the element's own
//! `(previous, current)` snapshot, never re-derived from scratch.
//!
//! Side effects are confined to each element's [`VisualState`]. No projection
//! rule touches the signal bus, which rules out feedback loops by
//! construction.

use crate::client::bus::{Signal, SignalChange};
use crate::collaborators::AvailabilityProbe;

/// Tag of a declared element, as relevant to role resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementTag {
    /// `<button>`
    Button,
    /// `<div>`
    Div,
    /// `<a>`
    Anchor,
}

/// A DOM node's declaration of interest, captured during the initial scan.
#[derive(Debug, Clone)]
pub struct ElementDecl {
    /// Element id attribute.
    pub id: String,

    /// Element tag.
    pub tag: ElementTag,

    /// Class list.
    pub classes: Vec<String>,

    /// `href` attribute, for card links.
    pub href: Option<String>,

    /// Declared the `online-aware` marker role.
    pub online_aware: bool,

    /// Declared the `signedin-aware` marker role.
    pub signedin_aware: bool,
}

impl ElementDecl {
    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Closed set of projection roles, resolved once at binding time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRole {
    /// The sign-in/out button: enabled iff online, regardless of sign-in
    /// state (it must stay clickable to sign in).
    AuthButton,

    /// Any other both-aware button: enabled iff online and signed in.
    GatedButton,

    /// A both-aware panel: full opacity and clickable iff online and signed
    /// in, otherwise dimmed with clicks suppressed.
    GatedPanel,

    /// An online-aware action button, driven solely by connectivity.
    OnlineButton,

    /// An online-aware card link. Offline does not always mean disabled: a
    /// cached copy confirmed by the availability probe keeps it active.
    OfflineCard,

    /// The offline-status banner: visible when offline, hidden when online.
    OfflineBanner,
}

impl ElementRole {
    /// Resolves a declaration to its projection role, most specific rule
    /// first. Declarations matching no rule are not bound.
    #[must_use]
    pub fn resolve(decl: &ElementDecl) -> Option<Self> {
        if decl.online_aware && decl.signedin_aware {
            return match decl.tag {
                ElementTag::Button if decl.id == "auth-button" => Some(Self::AuthButton),
                ElementTag::Button => Some(Self::GatedButton),
                ElementTag::Div => Some(Self::GatedPanel),
                ElementTag::Anchor => None,
            };
        }
        if decl.online_aware {
            if decl.has_class("offline-status") {
                return Some(Self::OfflineBanner);
            }
            if decl.tag == ElementTag::Div && decl.has_class("button") {
                return Some(Self::OnlineButton);
            }
            if decl.tag == ElementTag::Anchor && decl.has_class("card") {
                return Some(Self::OfflineCard);
            }
        }
        None
    }

    /// Whether elements in this role react to the given signal.
    #[must_use]
    pub fn aware_of(&self, signal: Signal) -> bool {
        match signal {
            Signal::Connectivity => true,
            Signal::Auth => matches!(self, Self::AuthButton | Self::GatedButton | Self::GatedPanel),
        }
    }
}

/// The visual attributes a projection may mutate.
///
/// This is the DOM boundary: applying a change ends here, with no further
/// propagation.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualState {
    /// Enabled/disabled, for buttons.
    pub enabled: bool,

    /// Opacity, for panels, cards and the banner.
    pub opacity: f32,

    /// Whether the element intercepts and cancels its own clicks.
    pub clicks_suppressed: bool,

    /// Whether the last opacity change requested a timed transition.
    pub transition: bool,

    /// Text content managed by the projection (auth button label, banner
    /// text).
    pub label: Option<&'static str>,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity: 1.0,
            clicks_suppressed: false,
            transition: false,
            label: None,
        }
    }
}

/// One bound element: role, last-applied signal snapshot, and visual state.
#[derive(Debug, Clone)]
pub struct BoundElement {
    /// Element id from the declaration.
    pub id: String,

    /// Resolved projection role.
    pub role: ElementRole,

    /// Card href, when the role needs one.
    pub href: Option<String>,

    /// Last-applied connectivity value. `false` until the first broadcast.
    pub online: bool,

    /// Last-applied sign-in value. `false` until the first broadcast.
    pub signed_in: bool,

    /// Current visual attributes.
    pub visual: VisualState,
}

/// Binds discovered elements and re-derives their visual state from signal
/// broadcasts.
///
/// Discovery happens once at construction; the binder holds no ownership of
/// anything beyond its bound set.
#[derive(Debug, Default)]
pub struct ElementBinder {
    elements: Vec<BoundElement>,
}

impl ElementBinder {
    /// Resolves roles for the declared elements and stamps initial `false`
    /// snapshots for both signals.
    ///
    /// Declarations matching no projection rule are skipped with a debug log.
    #[must_use]
    pub fn bind(decls: Vec<ElementDecl>) -> Self {
        let elements = decls
            .into_iter()
            .filter_map(|decl| match ElementRole::resolve(&decl) {
                Some(role) => {
                    let mut visual = VisualState::default();
                    if role == ElementRole::OfflineBanner {
                        visual.label = Some("Offline");
                    }
                    Some(BoundElement {
                        id: decl.id,
                        href: decl.href,
                        role,
                        online: false,
                        signed_in: false,
                        visual,
                    })
                }
                None => {
                    tracing::debug!(id = %decl.id, "element matches no projection rule, skipping");
                    None
                }
            })
            .collect();

        Self { elements }
    }

    /// All bound elements, in document order.
    #[must_use]
    pub fn elements(&self) -> &[BoundElement] {
        &self.elements
    }

    /// Looks up a bound element by id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&BoundElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Applies one signal broadcast to every aware element.
    ///
    /// Elements not aware of the changed signal keep both their snapshot and
    /// their visual state. Offline cards may await the availability probe,
    /// the single suspension point on this path; a slow probe simply resolves
    /// late and the element updates whenever it does.
    pub async fn apply(&mut self, change: SignalChange, probe: &dyn AvailabilityProbe) {
        tracing::debug!(signal = ?change.signal, value = change.value, "applying signal change");

        for element in &mut self.elements {
            if !element.role.aware_of(change.signal) {
                continue;
            }

            match change.signal {
                Signal::Connectivity => element.online = change.value,
                Signal::Auth => element.signed_in = change.value,
            }

            Self::project(element, probe).await;
        }
    }

    /// Re-derives one element's visual state from its signal snapshot.
    async fn project(element: &mut BoundElement, probe: &dyn AvailabilityProbe) {
        let online = element.online;
        let signed_in = element.signed_in;

        match element.role {
            ElementRole::AuthButton => {
                element.visual.enabled = online;
                element.visual.label = Some(if signed_in { "Logout" } else { "Login" });
            }
            ElementRole::GatedButton => {
                element.visual.enabled = online && signed_in;
            }
            ElementRole::GatedPanel => {
                if online && signed_in {
                    element.visual.opacity = 1.0;
                    element.visual.clicks_suppressed = false;
                } else {
                    element.visual.opacity = 0.5;
                    element.visual.clicks_suppressed = true;
                }
            }
            ElementRole::OnlineButton => {
                if online {
                    element.visual.transition = true;
                    element.visual.opacity = 1.0;
                    element.visual.clicks_suppressed = false;
                } else {
                    element.visual.opacity = 0.5;
                    element.visual.clicks_suppressed = true;
                }
            }
            ElementRole::OfflineCard => {
                if online {
                    element.visual.transition = true;
                    element.visual.opacity = 1.0;
                    element.visual.clicks_suppressed = false;
                } else if let Some(href) = element.href.as_deref() {
                    let available = match probe.is_available(href).await {
                        Ok(available) => available,
                        Err(error) => {
                            tracing::debug!(href, %error, "availability probe failed");
                            false
                        }
                    };
                    element.visual.transition = true;
                    if available {
                        element.visual.opacity = 1.0;
                        element.visual.clicks_suppressed = false;
                    } else {
                        element.visual.opacity = 0.5;
                        element.visual.clicks_suppressed = true;
                    }
                }
                // No href: nothing to probe, element keeps its state.
            }
            ElementRole::OfflineBanner => {
                element.visual.transition = true;
                element.visual.opacity = if online { 0.0 } else { 1.0 };
            }
        }
    }
}
