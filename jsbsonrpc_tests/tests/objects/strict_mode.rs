use crate::objects::helpers::model::{Order, OrderV2};
use crate::objects::helpers::raw::{elem, raw_doc};
use anyhow::Result;
use jsbsonrpc_types::codec::WireValue;
use jsbsonrpc_types::config::{
    standard_options, ConfigMask, OptionRegistry, FAIL_ON_UNKNOWN_PROPERTIES,
};
use jsbsonrpc_types::error::CodecError;
use jsbsonrpc_types::object::{Reflect, Serializable, NAME_KEY, VERSION_KEY};

fn v2_bytes() -> Result<Vec<u8>> {
    let mut v2 = OrderV2::new();
    v2.id.set(12);
    v2.coupon.set(String::from("WINTER"));
    v2.customer.set(String::from("Kay"));
    Ok(v2.to_bytes()?)
}

fn strict_rejects_unknown_property() -> Result<()> {
    let strict = &standard_options().fail_on_unknown_properties;
    let buf = v2_bytes()?;

    let mut order = Order::new();
    assert!(!order.config().is_enabled(strict));
    order.configure(strict, true);
    assert_eq!(
        order.decode(&buf, 0),
        Err(CodecError::UnknownProperty(String::from("coupon")))
    );
    // `id` precedes `coupon` on the wire; `customer` follows it.
    assert_eq!(*order.id, 12);
    assert!(order.customer.is_empty());

    order.configure(strict, false);
    assert_eq!(order.decode(&buf, 0)?, buf.len());
    assert_eq!(order.customer.as_str(), "Kay");
    Ok(())
}

fn reserved_keys_are_never_unknown() -> Result<()> {
    let strict = &standard_options().fail_on_unknown_properties;
    let buf = raw_doc(&[
        elem(|w| 3i64.encode_element("id", w)),
        elem(|w| 1i32.encode_element(VERSION_KEY, w)),
        elem(|w| String::from("Order").encode_element(NAME_KEY, w)),
    ])?;

    let mut order = Order::new();
    order.configure(strict, true);
    order.decode(&buf, 0)?;
    assert_eq!(*order.id, 3);

    order.decode(&Order::sample().to_bytes()?, 0)?;
    assert_eq!(order.line_skus(), vec!["bolt", "nut"]);
    Ok(())
}

fn injected_registry() -> Result<()> {
    let reg = OptionRegistry::new();
    let audit = reg.declare("AUDIT_DECODES", true)?;
    let strict = reg
        .options()
        .into_iter()
        .find(|opt| opt.name() == FAIL_ON_UNKNOWN_PROPERTIES)
        .ok_or_else(|| anyhow::anyhow!("standard bit missing"))?;

    let mask: ConfigMask = reg.default_mask().with(&strict, true);
    assert!(mask.is_enabled(&audit));

    let mut order = Order::new();
    order.object_core_mut().set_config(mask);
    assert!(matches!(
        order.decode(&v2_bytes()?, 0),
        Err(CodecError::UnknownProperty(_))
    ));

    // The mask travels with assignment.
    let mut copy = Order::new();
    copy.assign_from(&order)?;
    assert!(copy.config().is_enabled(&audit));
    assert!(copy.config().is_enabled(&strict));
    Ok(())
}

pub fn test_strict_mode() -> Result<()> {
    strict_rejects_unknown_property()?;
    reserved_keys_are_never_unknown()?;
    injected_registry()?;
    Ok(())
}
