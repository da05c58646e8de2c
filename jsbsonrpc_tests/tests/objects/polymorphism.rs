use crate::objects::helpers::model::{shape_factory, Canvas, Disc, Drawing, Square};
use anyhow::{anyhow, Result};
use jsbsonrpc_types::error::CodecError;
use jsbsonrpc_types::object::{DynamicList, DynamicSlot, FactoryRegistry, Serializable};
use std::sync::Arc;

fn drawing_of(shape: Box<dyn Serializable>) -> Result<Vec<u8>> {
    let mut drawing = Drawing::new(DynamicSlot::new());
    drawing.title.set(String::from("sketch"));
    drawing.shape.set(shape);
    Ok(drawing.to_bytes()?)
}

fn square(side: f64) -> Box<dyn Serializable> {
    let mut sq = Square::default();
    sq.side.set(side);
    Box::new(sq)
}

fn disc(version: i64, radius: f64) -> Box<dyn Serializable> {
    let mut d = Disc::with_version(version);
    d.radius.set(radius);
    d.center.set(vec![0.5, -0.5]);
    Box::new(d)
}

fn concrete_type_follows_the_wire() -> Result<()> {
    let mut dst = Drawing::new(DynamicSlot::with_factory(shape_factory()));

    dst.decode(&drawing_of(square(2.0))?, 0)?;
    assert_eq!(dst.title.as_str(), "sketch");
    let sq = dst
        .shape
        .downcast_ref::<Square>()
        .ok_or_else(|| anyhow!("expected a Square"))?;
    assert_eq!(*sq.side, 2.0);

    // The held Square is replaced, not decoded into.
    dst.decode(&drawing_of(disc(2, 1.5))?, 0)?;
    assert!(dst.shape.downcast_ref::<Square>().is_none());
    let d = dst
        .shape
        .downcast_ref::<Disc>()
        .ok_or_else(|| anyhow!("expected a Disc"))?;
    assert_eq!(*d.radius, 1.5);
    assert_eq!(d.center.as_slice(), &[0.5, -0.5]);
    assert_eq!(d.version(), 2);
    Ok(())
}

fn unregistered_version_has_no_instance() -> Result<()> {
    let buf = drawing_of(disc(1, 4.0))?;

    let mut dst = Drawing::new(DynamicSlot::with_factory(shape_factory()));
    assert_eq!(
        dst.decode(&buf, 0),
        Err(CodecError::NoInstance {
            name: Some(String::from("Disc")),
            version: Some(1),
        })
    );
    assert!(dst.shape.is_null());

    // A fallback constructor covers what the registry does not know.
    let mut reg = FactoryRegistry::new();
    reg.register("Square", || Box::new(Square::default()))
        .set_fallback(|| Box::new(Disc::with_version(1)));
    let mut dst = Drawing::new(DynamicSlot::with_factory(Arc::new(reg)));
    dst.decode(&buf, 0)?;
    assert_eq!(dst.shape.downcast_ref::<Disc>().map(|d| *d.radius), Some(4.0));

    // Without any factory, an instance already in the slot is reused.
    let mut slot = DynamicSlot::new();
    slot.set(disc(1, 0.0));
    let mut dst = Drawing::new(slot);
    dst.decode(&buf, 0)?;
    assert_eq!(dst.shape.downcast_ref::<Disc>().map(|d| *d.radius), Some(4.0));
    Ok(())
}

fn empty_shape_round_trips_as_null() -> Result<()> {
    let empty = Drawing::new(DynamicSlot::new());
    let buf = empty.to_bytes()?;
    assert_eq!(empty.is_field_null("shape"), Some(true));

    let mut dst = Drawing::new(DynamicSlot::with_factory(shape_factory()));
    dst.shape.set(square(1.0));
    dst.decode(&buf, 0)?;
    assert!(dst.shape.is_null());

    // clear_all keeps the held object but resets its fields.
    dst.decode(&drawing_of(square(3.0))?, 0)?;
    dst.clear_all();
    assert_eq!(dst.shape.downcast_ref::<Square>().map(|sq| *sq.side), Some(0.0));
    assert!(dst.title.is_empty());
    Ok(())
}

fn canvas_layers_keep_their_types() -> Result<()> {
    let mut layers = DynamicList::new();
    layers.push(square(1.0));
    layers.push(disc(2, 0.75));
    layers.push_null();
    layers.push(square(4.0));
    let buf = Canvas::new(layers).to_bytes()?;

    let mut dst = Canvas::new(DynamicList::with_factory(shape_factory()));
    dst.decode(&buf, 0)?;
    assert_eq!(dst.layers.len(), 4);
    assert_eq!(dst.layers.downcast_ref::<Square>(0).map(|sq| *sq.side), Some(1.0));
    let d = dst
        .layers
        .downcast_ref::<Disc>(1)
        .ok_or_else(|| anyhow!("expected a Disc"))?;
    assert_eq!((*d.radius, d.version()), (0.75, 2));
    assert!(dst.layers.get(2).is_none());
    assert_eq!(dst.layers.downcast_ref::<Square>(3).map(|sq| *sq.side), Some(4.0));
    assert_eq!(dst.to_bytes()?, buf);

    // One unknown layer fails the whole document.
    let mut layers = DynamicList::new();
    layers.push(square(1.0));
    layers.push(disc(1, 0.5));
    let buf = Canvas::new(layers).to_bytes()?;
    assert_eq!(
        dst.decode(&buf, 0),
        Err(CodecError::NoInstance {
            name: Some(String::from("Disc")),
            version: Some(1),
        })
    );
    Ok(())
}

pub fn test_polymorphism() -> Result<()> {
    concrete_type_follows_the_wire()?;
    unregistered_version_has_no_instance()?;
    empty_shape_round_trips_as_null()?;
    canvas_layers_keep_their_types()?;
    Ok(())
}
