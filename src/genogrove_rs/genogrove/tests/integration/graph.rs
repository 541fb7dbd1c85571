/*
 * Copyright (c) 2006-Present, Redis Ltd.
 * All rights reserved.
 *
 * Licensed under your choice of the Redis Source Available License 2.0
 * (RSALv2); or (b) the Server Side Public License v1 (SSPLv1); or (c) the
 * GNU Affero General Public License v3 (AGPLv3).
*/

//! Tests for edges between grove keys.

use genogrove::{Grove, GroveError, KeyHandle};
use pretty_assertions::assert_eq;

use crate::helpers::iv;

#[test]
fn test_exon_chain() {
    let mut grove = Grove::new(3).unwrap();
    let exons: Vec<_> = [(100, 200), (300, 400), (500, 600)]
        .into_iter()
        .map(|(s, e)| grove.insert("chr1", iv(s, e)))
        .collect();
    for pair in exons.windows(2) {
        grove.add_edge(pair[0], pair[1]).unwrap();
    }

    let hit = grove.intersect_index(&iv(350, 351), "chr1");
    let exon = hit.keys()[0].handle();
    assert_eq!(exon, exons[1]);
    let next: Vec<_> = grove.neighbors(exon).map(|k| *k.value()).collect();
    assert_eq!(next, [iv(500, 600)]);
    assert_eq!(grove.neighbors(exons[2]).count(), 0);
    assert_eq!(grove.num_edges(), 2);
}

#[test]
fn test_edges_across_indices() {
    let mut grove = Grove::default();
    let left = grove.insert("chr1", iv(1_000, 1_001));
    let right = grove.insert("chr7", iv(5_000, 5_001));
    grove.add_edge(left, right).unwrap();
    grove.add_edge(right, left).unwrap();
    assert!(grove.has_edge(left, right));
    assert!(grove.has_edge(right, left));
}

#[test]
fn test_out_of_range_handle_is_rejected() {
    let mut other = Grove::default();
    other.insert("chr1", iv(0, 1));
    other.insert("chr2", iv(0, 1));
    // Index 1 does not exist in `grove`, so the handle cannot resolve.
    let out_of_range: KeyHandle = other.insert("chr2", iv(5, 6));

    let mut grove = Grove::default();
    let own = grove.insert("chr1", iv(0, 1));
    assert!(grove.key(out_of_range).is_none());
    assert_eq!(
        grove.add_edge(own, out_of_range),
        Err(GroveError::UnknownKey(out_of_range))
    );
    assert!(!grove.has_edge(own, out_of_range));
    assert_eq!(grove.num_edges(), 0);
}

#[test]
fn test_handles_resolve_by_position() {
    let mut other = Grove::default();
    let borrowed = other.insert("chrX", iv(7, 8));

    let mut grove = Grove::default();
    let own = grove.insert("chr1", iv(0, 1));
    assert_eq!(borrowed, own);

    // The issuing grove is not recorded: an in-range handle from another
    // grove resolves to the key at the same positions here.
    let key = grove.key(borrowed).unwrap();
    assert_eq!(key.value(), &iv(0, 1));
    assert_eq!(grove.index_name(key.handle().index()), Some("chr1"));
    grove.add_edge(borrowed, own).unwrap();
    assert!(grove.has_edge(own, own));
}
