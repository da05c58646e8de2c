use jsbsonrpc_types::codec::Blob;
use jsbsonrpc_types::object::{
    DynamicList, DynamicSlot, Embedded, FactoryRegistry, ObjectCore, ObjectFactory, Reflect,
    Slot,
};
use std::collections::BTreeMap;
use std::sync::Arc;

macro_rules! impl_reflect {
    ($($ty:ident),* $(,)?) => {$(
        impl Reflect for $ty {
            fn object_core(&self) -> &ObjectCore<Self> {
                &self.core
            }
            fn object_core_mut(&mut self) -> &mut ObjectCore<Self> {
                &mut self.core
            }
        }
    )*};
}

impl_reflect!(Line, Order, OrderV2, Square, Disc, Drawing, Canvas);

/* Orders */

pub struct Line {
    core: ObjectCore<Line>,
    pub sku: Slot<String>,
    pub qty: Slot<u16>,
    pub price: Slot<f64>,
}
impl Line {
    pub fn new(sku: &str, qty: u16, price: f64) -> Self {
        let mut moi = Self {
            core: ObjectCore::new("Line", 1),
            sku: Slot::new(sku.to_owned()),
            qty: Slot::new(qty),
            price: Slot::new(price),
        };
        moi.bind("sku", |o| &o.sku, |o| &mut o.sku)
            .bind("qty", |o| &o.qty, |o| &mut o.qty)
            .bind("price", |o| &o.price, |o| &mut o.price);
        moi
    }
}
impl Default for Line {
    fn default() -> Self {
        Self::new("", 0, 0.0)
    }
}

pub struct Order {
    core: ObjectCore<Order>,
    pub id: Slot<i64>,
    pub customer: Slot<String>,
    pub lines: Slot<Vec<Embedded<Line>>>,
    pub notes: Slot<BTreeMap<String, String>>,
    pub checksum: Slot<Blob<u32>>,
    pub shipped: Slot<bool>,
}
impl Order {
    pub fn new() -> Self {
        let mut moi = Self {
            core: ObjectCore::new("Order", 1),
            id: Slot::default(),
            customer: Slot::default(),
            lines: Slot::default(),
            notes: Slot::default(),
            checksum: Slot::default(),
            shipped: Slot::default(),
        };
        moi.bind("id", |o| &o.id, |o| &mut o.id)
            .bind("customer", |o| &o.customer, |o| &mut o.customer)
            .bind("lines", |o| &o.lines, |o| &mut o.lines)
            .bind("notes", |o| &o.notes, |o| &mut o.notes)
            .bind("checksum", |o| &o.checksum, |o| &mut o.checksum)
            .bind("shipped", |o| &o.shipped, |o| &mut o.shipped);
        moi
    }

    pub fn sample() -> Self {
        let mut moi = Self::new();
        moi.id.set(9001);
        moi.customer.set(String::from("Ada"));
        moi.lines.set(vec![
            Embedded(Line::new("bolt", 40, 0.15)),
            Embedded(Line::new("nut", 40, 0.05)),
        ]);
        moi.notes
            .set(BTreeMap::from([(String::from("gate"), String::from("B"))]));
        moi.checksum.set(Blob(vec![0xCAFE_F00D, 7]));
        moi
    }

    pub fn line_skus(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.sku.as_str()).collect()
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

/// A later revision of `Order` with one more field.
pub struct OrderV2 {
    core: ObjectCore<OrderV2>,
    pub id: Slot<i64>,
    pub customer: Slot<String>,
    pub coupon: Slot<String>,
}
impl OrderV2 {
    pub fn new() -> Self {
        let mut moi = Self {
            core: ObjectCore::new("Order", 2),
            id: Slot::default(),
            customer: Slot::default(),
            coupon: Slot::default(),
        };
        moi.bind("id", |o| &o.id, |o| &mut o.id)
            .bind("coupon", |o| &o.coupon, |o| &mut o.coupon)
            .bind("customer", |o| &o.customer, |o| &mut o.customer);
        moi
    }
}

impl Default for OrderV2 {
    fn default() -> Self {
        Self::new()
    }
}

/* Shapes */

pub struct Square {
    core: ObjectCore<Square>,
    pub side: Slot<f64>,
}
impl Default for Square {
    fn default() -> Self {
        let mut moi = Self {
            core: ObjectCore::new("Square", 1),
            side: Slot::default(),
        };
        moi.bind("side", |o| &o.side, |o| &mut o.side);
        moi
    }
}

pub struct Disc {
    core: ObjectCore<Disc>,
    pub radius: Slot<f64>,
    pub center: Slot<Vec<f64>>,
}
impl Disc {
    pub fn with_version(version: i64) -> Self {
        let mut moi = Self {
            core: ObjectCore::new("Disc", version),
            radius: Slot::default(),
            center: Slot::default(),
        };
        moi.bind("radius", |o| &o.radius, |o| &mut o.radius)
            .bind("center", |o| &o.center, |o| &mut o.center);
        moi
    }
}

pub struct Drawing {
    core: ObjectCore<Drawing>,
    pub title: Slot<String>,
    pub shape: DynamicSlot,
}
impl Drawing {
    pub fn new(shape: DynamicSlot) -> Self {
        let mut moi = Self {
            core: ObjectCore::new("Drawing", 1),
            title: Slot::default(),
            shape,
        };
        moi.bind("title", |o| &o.title, |o| &mut o.title)
            .bind_dynamic("shape", |o| &o.shape, |o| &mut o.shape);
        moi
    }
}

pub struct Canvas {
    core: ObjectCore<Canvas>,
    pub layers: Slot<DynamicList>,
}
impl Canvas {
    pub fn new(layers: DynamicList) -> Self {
        let mut moi = Self {
            core: ObjectCore::new("Canvas", 1),
            layers: Slot::new(layers),
        };
        moi.bind("layers", |o| &o.layers, |o| &mut o.layers);
        moi
    }
}

/// Knows `Square` at any version and `Disc` at version 2 only.
pub fn shape_factory() -> Arc<dyn ObjectFactory> {
    let mut reg = FactoryRegistry::new();
    reg.register("Square", || Box::new(Square::default()))
        .register_version("Disc", 2, || Box::new(Disc::with_version(2)));
    Arc::new(reg)
}
