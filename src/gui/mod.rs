/// Guis
///
/// A gui is a variant (see [`GuiKind`]) plus the components pinned onto the
/// variant's container, the callbacks the router invokes and, for versioned
/// variants, the backend that creates the device inventory. Guis are shared
/// through [`GuiHandle`]; the host inventory a gui creates points back at it.

pub mod cache;
pub mod definition;
pub mod kind;
pub mod merchant;

pub use cache::HumanEntityCache;
pub use definition::GuiDefinition;
pub use kind::{ComponentLayout, ComponentName, GuiFlags, GuiKind};
pub use merchant::MerchantRecipe;

use crate::backend::{GuiBackend, MerchantInventory};
use crate::component::InventoryComponent;
use crate::error::{GuiError, GuiResult};
use crate::host::{
    Host, InventoryClickEvent, InventoryCloseEvent, InventoryDragEvent, InventoryId, InventoryOpenEvent,
    TradeSelectEvent, ViewerId,
};
use crate::pane::{ClickHandler, ClickTarget};
use crate::version::Version;
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::sync::Arc;

pub type DragHandler = Arc<dyn Fn(&mut InventoryDragEvent, &mut Host) + Send + Sync>;
pub type OpenHandler = Arc<dyn Fn(&InventoryOpenEvent, &mut Host) + Send + Sync>;
pub type CloseHandler = Arc<dyn Fn(&InventoryCloseEvent, &mut Host) + Send + Sync>;
pub type TradeSelectHandler = Arc<dyn Fn(&mut TradeSelectEvent, &mut Host) + Send + Sync>;

/// Callback slots. Copies of a gui share the callbacks.
#[derive(Clone, Default)]
pub(crate) struct Handlers {
    pub global_click: Option<ClickHandler>,
    pub top_click: Option<ClickHandler>,
    pub bottom_click: Option<ClickHandler>,
    pub outside_click: Option<ClickHandler>,
    pub global_drag: Option<DragHandler>,
    pub top_drag: Option<DragHandler>,
    pub bottom_drag: Option<DragHandler>,
    pub open: Option<OpenHandler>,
    pub close: Option<CloseHandler>,
    pub trade_select: Option<TradeSelectHandler>,
}

pub struct Gui {
    kind: GuiKind,
    title: String,
    components: Vec<(ComponentLayout, InventoryComponent)>,
    dirty: bool,
    inventory: Option<InventoryId>,
    handlers: Handlers,
    parent: Option<GuiHandle>,
    backend: Option<GuiBackend>,
    trades: Vec<(MerchantRecipe, i32)>,
    merchant_level: u32,
    merchant_experience: u32,
    cache: HumanEntityCache,
}

impl Gui {
    pub fn new(kind: GuiKind, title: impl Into<String>) -> Self {
        let components = kind
            .layout()
            .into_iter()
            .map(|layout| (layout, InventoryComponent::new(layout.width, layout.height)))
            .collect();

        Self {
            kind,
            title: title.into(),
            components,
            dirty: true,
            inventory: None,
            handlers: Handlers::default(),
            parent: None,
            backend: None,
            trades: Vec::new(),
            merchant_level: 0,
            merchant_experience: 0,
            cache: HumanEntityCache::new(),
        }
    }

    /// Create a gui whose backend is resolved up front for `version`.
    /// Fails when the variant does not exist in that version.
    pub fn for_version(kind: GuiKind, title: impl Into<String>, version: Version) -> GuiResult<Self> {
        let mut gui = Self::new(kind, title);

        if let Some(capability) = kind.capability() {
            gui.backend = Some(GuiBackend::resolve(capability, version)?);
        }

        Ok(gui)
    }

    pub fn kind(&self) -> GuiKind {
        self.kind
    }

    pub fn flags(&self) -> GuiFlags {
        self.kind.flags()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Change the title. The inventory is recreated on the next show.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn component(&self, name: ComponentName) -> Option<&InventoryComponent> {
        self.components
            .iter()
            .find(|(layout, _)| layout.name == name)
            .map(|(_, component)| component)
    }

    pub fn component_mut(&mut self, name: ComponentName) -> Option<&mut InventoryComponent> {
        self.components
            .iter_mut()
            .find(|(layout, _)| layout.name == name)
            .map(|(_, component)| component)
    }

    /// The single component of merged variants
    pub fn inventory_component(&mut self) -> Option<&mut InventoryComponent> {
        self.component_mut(ComponentName::Inventory)
    }

    pub fn player_inventory_component(&mut self) -> Option<&mut InventoryComponent> {
        self.component_mut(ComponentName::PlayerInventory)
    }

    pub fn components(&self) -> impl Iterator<Item = (ComponentName, &InventoryComponent)> {
        self.components.iter().map(|(layout, component)| (layout.name, component))
    }

    /// Live host inventory, if one was created
    pub fn inventory(&self) -> Option<InventoryId> {
        self.inventory
    }

    pub fn backend(&self) -> Option<&GuiBackend> {
        self.backend.as_ref()
    }

    pub fn cache(&self) -> &HumanEntityCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut HumanEntityCache {
        &mut self.cache
    }

    pub fn parent(&self) -> Option<&GuiHandle> {
        self.parent.as_ref()
    }

    /// Gui to show again when this one closes
    pub fn set_parent(&mut self, parent: Option<GuiHandle>) {
        self.parent = parent;
    }

    pub fn set_on_global_click(&mut self, handler: impl Fn(&mut InventoryClickEvent, &mut Host) + Send + Sync + 'static) {
        self.handlers.global_click = Some(Arc::new(handler));
    }

    pub fn set_on_top_click(&mut self, handler: impl Fn(&mut InventoryClickEvent, &mut Host) + Send + Sync + 'static) {
        self.handlers.top_click = Some(Arc::new(handler));
    }

    pub fn set_on_bottom_click(&mut self, handler: impl Fn(&mut InventoryClickEvent, &mut Host) + Send + Sync + 'static) {
        self.handlers.bottom_click = Some(Arc::new(handler));
    }

    pub fn set_on_outside_click(&mut self, handler: impl Fn(&mut InventoryClickEvent, &mut Host) + Send + Sync + 'static) {
        self.handlers.outside_click = Some(Arc::new(handler));
    }

    pub fn set_on_global_drag(&mut self, handler: impl Fn(&mut InventoryDragEvent, &mut Host) + Send + Sync + 'static) {
        self.handlers.global_drag = Some(Arc::new(handler));
    }

    pub fn set_on_top_drag(&mut self, handler: impl Fn(&mut InventoryDragEvent, &mut Host) + Send + Sync + 'static) {
        self.handlers.top_drag = Some(Arc::new(handler));
    }

    pub fn set_on_bottom_drag(&mut self, handler: impl Fn(&mut InventoryDragEvent, &mut Host) + Send + Sync + 'static) {
        self.handlers.bottom_drag = Some(Arc::new(handler));
    }

    pub fn set_on_open(&mut self, handler: impl Fn(&InventoryOpenEvent, &mut Host) + Send + Sync + 'static) {
        self.handlers.open = Some(Arc::new(handler));
    }

    pub fn set_on_close(&mut self, handler: impl Fn(&InventoryCloseEvent, &mut Host) + Send + Sync + 'static) {
        self.handlers.close = Some(Arc::new(handler));
    }

    /// Only merchant guis receive trade selections
    pub fn set_on_trade_select(&mut self, handler: impl Fn(&mut TradeSelectEvent, &mut Host) + Send + Sync + 'static) {
        self.handlers.trade_select = Some(Arc::new(handler));
    }

    pub(crate) fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    /// Add a trade with its special price difference
    pub fn add_trade(&mut self, recipe: MerchantRecipe, discount: i32) {
        self.trades.push((recipe, discount));
    }

    pub fn trades(&self) -> &[(MerchantRecipe, i32)] {
        &self.trades
    }

    pub fn set_merchant_level(&mut self, level: u32) {
        self.merchant_level = level;
    }

    pub fn set_merchant_experience(&mut self, experience: u32) {
        self.merchant_experience = experience;
    }

    /// Text typed into an anvil's rename field
    pub fn rename_text(&self, host: &Host) -> Option<String> {
        match (&self.backend, self.inventory) {
            (Some(GuiBackend::Anvil(backend)), Some(inventory)) => backend.rename_text(host, inventory),
            _ => None,
        }
    }

    /// Whether the gui renders anything into the viewer's own inventory
    pub fn is_player_inventory_used(&self) -> bool {
        self.components.iter().any(|(layout, component)| match layout.name {
            ComponentName::Inventory => {
                let rows = self.kind.container_rows();
                let rendered = component.rendered();
                rendered
                    .iter()
                    .skip(rows * component.width())
                    .any(Option::is_some)
            }
            ComponentName::PlayerInventory => component.rendered().iter().any(Option::is_some),
            _ => false,
        })
    }

    /// Deep copy for serving the same gui to viewers independently.
    /// Callbacks, parent and backend are shared; the copy has no inventory yet.
    pub fn copy(&self) -> Gui {
        Gui {
            kind: self.kind,
            title: self.title.clone(),
            components: self.components.clone(),
            dirty: true,
            inventory: None,
            handlers: self.handlers.clone(),
            parent: self.parent.clone(),
            backend: self.backend.clone(),
            trades: self.trades.clone(),
            merchant_level: self.merchant_level,
            merchant_experience: self.merchant_experience,
            cache: HumanEntityCache::new(),
        }
    }

    pub fn viewers(&self, host: &Host) -> Vec<ViewerId> {
        self.inventory.map(|id| host.viewers(id)).unwrap_or_default()
    }

    pub fn viewer_count(&self, host: &Host) -> usize {
        self.viewers(host).len()
    }

    /// Handlers of the pane that owns the clicked raw slot
    pub fn resolve_click(&self, event: &InventoryClickEvent) -> Option<Vec<ClickTarget>> {
        let raw_slot = usize::try_from(event.raw_slot).ok()?;

        self.components
            .iter()
            .find(|(layout, component)| {
                if layout.name == ComponentName::Inventory {
                    raw_slot < component.len()
                } else {
                    layout.contains(raw_slot)
                }
            })
            .and_then(|(layout, component)| component.resolve_click(raw_slot - layout.offset))
    }

    /// Route a click to the owning pane. Returns whether a pane owned it.
    ///
    /// Runs the handlers while `self` is borrowed; behind a [`GuiHandle`] use
    /// [`GuiHandle::click`] so handlers can lock the gui.
    pub fn click(&self, event: &mut InventoryClickEvent, host: &mut Host) -> bool {
        ClickTarget::invoke_all(self.resolve_click(event), event, host)
    }

    /// Create the inventory if needed and render every component for `viewer`
    fn render(&mut self, host: &mut Host, viewer: ViewerId, holder: &GuiHandle) -> GuiResult<InventoryId> {
        let is_player = host.entity_or_err(viewer)?.is_player;

        if self.flags().contains(GuiFlags::VERSIONED) && !is_player {
            return Err(GuiError::InvalidViewer {
                viewer,
                reason: format!("{} guis can only be opened by players", self.kind),
            });
        }

        if self.backend.is_none() {
            if let Some(capability) = self.kind.capability() {
                self.backend = Some(GuiBackend::resolve(capability, host.version())?);
            }
        }

        let live = self.inventory.filter(|id| host.inventory(*id).is_some());

        let inventory = match live {
            Some(id) if !self.dirty => id,
            _ => {
                let id = match &self.backend {
                    Some(backend) => backend.create_inventory(host, &self.title, Some(holder.clone()))?,
                    None => host.create_inventory(
                        self.kind.inventory_type(),
                        self.kind.top_size(),
                        self.title.clone(),
                        Some(holder.clone()),
                    ),
                };

                if let Some(old) = self.inventory.replace(id) {
                    host.remove_inventory(old);
                }

                self.dirty = false;
                log::debug!("[Gui::render] Created {} for {} gui '{}'", id, self.kind, self.title);
                id
            }
        };

        let rows = self.kind.container_rows();
        let mut top_slots = vec![None; self.kind.top_size()];

        for (layout, component) in &mut self.components {
            component.display();

            match layout.name {
                ComponentName::Inventory => {
                    let top = component.exclude_rows(rows, component.height().saturating_sub(1));
                    top.place_items(&mut top_slots, 0);

                    let bottom = component.exclude_rows(0, rows.saturating_sub(1));

                    if bottom.has_item() {
                        self.cache.store_and_clear(host, viewer)?;
                        bottom.place_into_player_inventory(&mut host.entity_or_err(viewer)?.inventory);
                    }
                }
                ComponentName::PlayerInventory => {
                    if component.has_item() {
                        self.cache.store_and_clear(host, viewer)?;
                        component.place_into_player_inventory(&mut host.entity_or_err(viewer)?.inventory);
                    }
                }
                _ => component.place_items(&mut top_slots, layout.offset),
            }
        }

        host.inventory_or_err(inventory)?.slots = top_slots;

        Ok(inventory)
    }

    fn merchant_offers(&self) -> Option<(Arc<dyn MerchantInventory>, Vec<(MerchantRecipe, i32)>, u32, u32)> {
        match &self.backend {
            Some(GuiBackend::Merchant(backend)) => Some((
                backend.clone(),
                self.trades.clone(),
                self.merchant_level,
                self.merchant_experience,
            )),
            _ => None,
        }
    }
}

impl fmt::Debug for Gui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gui")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("dirty", &self.dirty)
            .field("inventory", &self.inventory)
            .field("backend", &self.backend.as_ref().map(GuiBackend::descriptor))
            .finish_non_exhaustive()
    }
}

/// Shared reference to a gui. Equality is identity.
#[derive(Clone)]
pub struct GuiHandle(Arc<Mutex<Gui>>);

impl GuiHandle {
    pub fn new(gui: Gui) -> Self {
        Self(Arc::new(Mutex::new(gui)))
    }

    pub fn lock(&self) -> MutexGuard<'_, Gui> {
        self.0.lock()
    }

    pub fn ptr_eq(&self, other: &GuiHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Render the gui for `viewer` and open it
    pub fn show(&self, host: &mut Host, viewer: ViewerId) -> GuiResult<()> {
        let (inventory, merchant) = {
            let mut gui = self.lock();
            let inventory = gui.render(host, viewer, self)?;
            (inventory, gui.merchant_offers())
        };

        let already_open = host.entity(viewer).and_then(|entity| entity.open_inventory) == Some(inventory);

        if !already_open {
            host.open_inventory(viewer, inventory)?;
        }

        if let Some((backend, trades, level, experience)) = merchant {
            backend.send_merchant_offers(host, viewer, &trades, level, experience)?;
        }

        Ok(())
    }

    /// Render again for every current viewer
    pub fn update(&self, host: &mut Host) -> GuiResult<()> {
        let (viewers, previous) = {
            let gui = self.lock();
            (gui.viewers(host), gui.inventory)
        };

        for viewer in viewers {
            self.show(host, viewer)?;
        }

        if let Some(previous) = previous {
            if self.lock().inventory != Some(previous) {
                host.remove_inventory(previous);
            }
        }

        Ok(())
    }

    /// Route a click to the owning pane without holding the lock while handlers run
    pub fn click(&self, event: &mut InventoryClickEvent, host: &mut Host) -> bool {
        let targets = self.lock().resolve_click(event);
        ClickTarget::invoke_all(targets, event, host)
    }

    /// Show the parent gui, if any, to `viewer`
    pub fn navigate_to_parent(&self, host: &mut Host, viewer: ViewerId) -> GuiResult<()> {
        let parent = self.lock().parent.clone();

        match parent {
            Some(parent) => parent.show(host, viewer),
            None => Ok(()),
        }
    }

    pub fn viewers(&self, host: &Host) -> Vec<ViewerId> {
        self.lock().viewers(host)
    }

    pub fn viewer_count(&self, host: &Host) -> usize {
        self.lock().viewer_count(host)
    }

    pub fn is_player_inventory_used(&self) -> bool {
        self.lock().is_player_inventory_used()
    }

    /// Independent deep copy behind a new handle
    pub fn copy(&self) -> GuiHandle {
        GuiHandle::new(self.lock().copy())
    }
}

impl PartialEq for GuiHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for GuiHandle {}

impl fmt::Debug for GuiHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_lock() {
            Some(gui) => write!(f, "GuiHandle({} '{}')", gui.kind, gui.title),
            None => f.write_str("GuiHandle(<locked>)"),
        }
    }
}
