use crate::objects::helpers::model::{Line, Order, OrderV2};
use crate::objects::helpers::raw::{elem, raw_doc, ElemFn};
use anyhow::{ensure, Result};
use jsbsonrpc_types::codec::{Blob, WireValue};
use jsbsonrpc_types::object::{Embedded, Serializable, NAME_KEY, VERSION_KEY};
use jsbsonrpc_types::wire::WireType;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

fn round_trip() -> Result<()> {
    let src = Order::sample();
    let mut buf = vec![];
    let w_len = src.encode(&mut buf)?;

    let mut dst = Order::new();
    let r_len = dst.decode(&buf, 0)?;
    assert_eq!(w_len, r_len);
    assert_eq!(*dst.id, 9001);
    assert_eq!(dst.customer.as_str(), "Ada");
    assert_eq!(dst.line_skus(), vec!["bolt", "nut"]);
    assert_eq!(*dst.lines[1].qty, 40);
    assert_eq!(dst.notes.get("gate").map(String::as_str), Some("B"));
    assert_eq!(dst.checksum.0, vec![0xCAFE_F00D, 7]);
    assert!(!*dst.shipped);

    // Re-encoding the decoded object reproduces the bytes.
    assert_eq!(dst.to_bytes()?, buf);
    Ok(())
}

fn order_elems() -> Vec<ElemFn> {
    vec![
        elem(|w| String::from("Order").encode_element(NAME_KEY, w)),
        elem(|w| 1i64.encode_element(VERSION_KEY, w)),
        elem(|w| 77i64.encode_element("id", w)),
        elem(|w| String::from("Grace").encode_element("customer", w)),
        elem(|w| vec![Embedded(Line::new("gear", 2, 9.5))].encode_element("lines", w)),
        elem(|w| true.encode_element("shipped", w)),
        elem(|w| Blob(vec![1u32, 2, 3]).encode_element("checksum", w)),
    ]
}

fn any_element_order() -> Result<()> {
    let mut rand_rng = rand::thread_rng();
    let mut elems = order_elems();
    for _ in 0..20 {
        elems.shuffle(&mut rand_rng);
        let buf = raw_doc(&elems)?;

        let mut dst = Order::new();
        assert_eq!(dst.decode(&buf, 0)?, buf.len());
        assert_eq!(*dst.id, 77);
        assert_eq!(dst.customer.as_str(), "Grace");
        assert_eq!(dst.line_skus(), vec!["gear"]);
        assert_eq!(*dst.lines[0].price, 9.5);
        assert!(*dst.shipped);
        assert_eq!(dst.checksum.0, vec![1, 2, 3]);
        // Absent from the wire, so left as constructed.
        assert!(dst.notes.is_empty());
    }
    Ok(())
}

fn list_takes_arrival_order() -> Result<()> {
    let elems: Vec<ElemFn> = vec![
        elem(|w| String::from("Order").encode_element(NAME_KEY, w)),
        elem(|w| 1i64.encode_element(VERSION_KEY, w)),
        elem(|w| {
            w.element(WireType::Array, "lines", |w| {
                let mark = w.begin_document();
                Embedded(Line::new("second", 1, 0.0)).encode_element("1", w)?;
                Embedded(Line::new("first", 1, 0.0)).encode_element("0", w)?;
                w.end_document(mark)?;
                Ok(())
            })
        }),
    ];
    let buf = raw_doc(&elems)?;

    let mut dst = Order::sample();
    dst.decode(&buf, 0)?;
    assert_eq!(dst.line_skus(), vec!["second", "first"]);
    // Fields missing from the wire keep their previous values.
    assert_eq!(*dst.id, 9001);
    Ok(())
}

fn newer_revision_is_readable() -> Result<()> {
    let mut v2 = OrderV2::new();
    v2.id.set(5);
    v2.customer.set(String::from("Lin"));
    v2.coupon.set(String::from("SPRING"));
    let buf = v2.to_bytes()?;

    let mut v1 = Order::new();
    assert_eq!(v1.decode(&buf, 0)?, buf.len());
    assert_eq!(*v1.id, 5);
    assert_eq!(v1.customer.as_str(), "Lin");
    assert_eq!(v1.version(), 1);

    // And back: v2 reads a v1 document, leaving `coupon` untouched.
    let mut v2 = OrderV2::new();
    v2.coupon.set(String::from("kept"));
    v2.decode(&Order::sample().to_bytes()?, 0)?;
    assert_eq!(*v2.id, 9001);
    assert_eq!(v2.coupon.as_str(), "kept");
    Ok(())
}

fn clear_and_assign() -> Result<()> {
    let src = Order::sample();

    let mut dst = Order::new();
    dst.assign_from(&src)?;
    assert_eq!(dst.line_skus(), src.line_skus());
    assert_eq!(dst.to_bytes()?, src.to_bytes()?);

    dst.clear_all();
    assert_eq!(*dst.id, 0);
    assert!(dst.customer.is_empty());
    assert!(dst.lines.is_empty());
    assert!(dst.notes.is_empty());
    assert!(dst.checksum.0.is_empty());
    assert_eq!(dst.type_name(), "Order");

    ensure!(
        dst.assign_from(&OrderV2::new()).is_err(),
        "assigning across versions must fail"
    );
    Ok(())
}

fn truncated_orders_fail() -> Result<()> {
    let buf = Order::sample().to_bytes()?;
    for cut in (0..buf.len()).step_by(3) {
        let mut dst = Order::new();
        let res = dst.decode(&buf[..cut], 0);
        ensure!(
            res.as_ref().is_err_and(|e| e.is_parse_failure()),
            "cut {cut}: {res:?}"
        );
    }

    // Unknown entries in a map field are data, not properties.
    let mut src = Order::new();
    src.notes.set(BTreeMap::from([
        (String::from("a"), String::from("1")),
        (String::from("b"), String::from("2")),
    ]));
    let mut dst = Order::new();
    dst.decode(&src.to_bytes()?, 0)?;
    assert_eq!(dst.notes.len(), 2);
    Ok(())
}

pub fn test_scenarios() -> Result<()> {
    round_trip()?;
    any_element_order()?;
    list_takes_arrival_order()?;
    newer_revision_is_readable()?;
    clear_and_assign()?;
    truncated_orders_fail()?;
    Ok(())
}
