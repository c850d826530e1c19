//! Integration tests for the zkapp-account crate.
//!
//! The native computations are the reference; every checked computation is
//! run through the proving driver and compared against them.

use ff::Field;
use pasta_curves::Fp;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zkapp_account::checked::{EventVar, LogVar, ZkappAccountVar, ZkappUriVar};
use zkapp_account::verification_key::dummy_vk_hash;
use zkapp_account::{
    account_from_json, account_to_json, hash_zkapp_uri, AccountDigestCircuit, Actions, Event,
    Events, LogKind, LogStack, ProofsVerified, VerificationKey, VerificationKeyWithHash,
    ZkappAccount, ZkappError, ZkappUri, MAX_STATE_SIZE, MAX_URI_LENGTH, SEQUENCE_STATE_LEN,
};
use zkapp_synth::drivers::{CountingDriver, ProvingDriver};
use zkapp_synth::{Always, Empty, Maybe};

type Dr = ProvingDriver<Fp>;

fn random_fp(rng: &mut StdRng) -> Fp {
    Fp::random(&mut *rng)
}

fn random_vk(rng: &mut StdRng) -> VerificationKeyWithHash {
    let len = rng.gen_range(0..200);
    let max_proofs_verified = match rng.gen_range(0..3) {
        0 => ProofsVerified::N0,
        1 => ProofsVerified::N1,
        _ => ProofsVerified::N2,
    };
    VerificationKeyWithHash::new(VerificationKey {
        max_proofs_verified,
        wrap_index: (0..len).map(|_| rng.gen()).collect(),
    })
}

fn random_uri(rng: &mut StdRng, len: usize) -> ZkappUri {
    ZkappUri::new((0..len).map(|_| rng.gen::<u8>()).collect::<Vec<_>>()).unwrap()
}

fn random_account(rng: &mut StdRng) -> ZkappAccount {
    let mut account = ZkappAccount::default();
    for slot in account.app_state.iter_mut() {
        *slot = random_fp(rng);
    }
    for slot in account.sequence_state.iter_mut() {
        *slot = random_fp(rng);
    }
    if rng.gen() {
        account.verification_key = Some(random_vk(rng));
    }
    account.zkapp_version = rng.gen();
    account.last_sequence_slot = rng.gen();
    account.proved_state = rng.gen();
    let uri_len = rng.gen_range(0..=MAX_URI_LENGTH);
    account.zkapp_uri = random_uri(rng, uri_len);
    account
}

fn checked_digest(account: &ZkappAccount) -> (Fp, bool) {
    let mut dr = Dr::new();
    let var = ZkappAccountVar::alloc(&mut dr, Always(account)).unwrap();
    let digest = var.digest(&mut dr).unwrap();
    (dr.get_witness(digest.wire), dr.is_satisfied())
}

// =============================================================================
// Logs
// =============================================================================

#[test]
fn test_events_scenario_native() {
    let e1 = Event::from([1, 2]);
    let e2 = Event::from([3]);

    let mut stack = LogStack::<Events>::new();
    let d0 = stack.digest();
    let d1 = stack.push(e1.clone());
    let d2 = stack.push(e2.clone());

    assert_eq!(d0, Events::empty_digest());
    assert_eq!(d2, Events::hash(&[e2.clone(), e1.clone()]));

    assert_eq!(stack.pop().unwrap(), (e2, d1));
    assert_eq!(stack.pop().unwrap(), (e1, d0));
    assert_eq!(stack.pop(), Err(ZkappError::LogUnderflow));
}

#[test]
fn test_trailing_zero_field_changes_event_and_log() {
    let short = Event::from([1]);
    let padded = Event::from([1, 0]);
    assert_ne!(short.hash(), padded.hash());
    assert_ne!(Event::from([0u64; 0]).hash(), Event::from([0]).hash());
    assert_ne!(
        Events::hash(&[short.clone()]),
        Events::hash(&[padded.clone()])
    );
    assert_ne!(
        Actions::hash(&[short.clone()]),
        Actions::hash(&[padded.clone()])
    );

    for event in [short, padded] {
        let mut dr = Dr::new();
        let var = EventVar::alloc(&mut dr, event.len(), &Always(event.clone())).unwrap();
        let digest = var.hash(&mut dr).unwrap();
        assert_eq!(dr.get_witness(digest.wire), event.hash());
    }
}

#[test]
fn test_events_scenario_checked() {
    let e1 = Event::from([1, 2]);
    let e2 = Event::from([3]);
    let mut dr = Dr::new();

    let d0 = LogVar::<Dr, Events>::empty(&mut dr).unwrap();
    let v1 = EventVar::alloc(&mut dr, 2, &Always(e1.clone())).unwrap();
    let d1 = d0.push_checked(&mut dr, &v1).unwrap();
    let v2 = EventVar::alloc(&mut dr, 1, &Always(e2.clone())).unwrap();
    let d2 = d1.push_checked(&mut dr, &v2).unwrap();

    let (head, below) = d2.pop_checked(&mut dr).unwrap();
    assert_eq!(dr.get_witness(head.hash.wire), e2.hash());
    assert_eq!(head.open(&mut dr, 1).unwrap().value().take(), e2);
    assert_eq!(dr.get_witness(below.digest.wire), dr.get_witness(d1.digest.wire));

    let (head, bottom) = below.pop_checked(&mut dr).unwrap();
    assert_eq!(head.event.take(), e1);
    assert_eq!(dr.get_witness(bottom.digest.wire), Events::empty_digest());

    assert!(matches!(
        bottom.pop_checked(&mut dr),
        Err(ZkappError::LogUnderflow)
    ));
    assert!(dr.check_constraints().is_ok());
}

#[test]
fn test_push_pop_native_and_checked_agree() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut dr = Dr::new();
    let mut native = LogStack::<Actions>::new();
    let mut checked = LogVar::<Dr, Actions>::empty(&mut dr).unwrap();

    let mut lens = Vec::new();
    for _ in 0..6 {
        let len = rng.gen_range(0..4);
        let event = Event::new((0..len).map(|_| random_fp(&mut rng)).collect());
        native.push(event.clone());
        let var = EventVar::alloc(&mut dr, len, &Always(event)).unwrap();
        checked = checked.push_checked(&mut dr, &var).unwrap();
        assert_eq!(dr.get_witness(checked.digest.wire), native.digest());
        lens.push(len);
    }

    while let Some(len) = lens.pop() {
        let (event, below) = native.pop().unwrap();
        let (head, tail) = checked.pop_checked(&mut dr).unwrap();
        let opened = head.open(&mut dr, len).unwrap();
        assert_eq!(opened.value().take(), event);
        assert_eq!(dr.get_witness(tail.digest.wire), below);
        checked = tail;
    }
    assert_eq!(native.digest(), Actions::empty_digest());
    assert!(dr.check_constraints().is_ok());
}

#[test]
fn test_empty_and_singleton_digests() {
    assert_eq!(Events::hash(&[]), Events::empty_digest());
    assert_ne!(Events::hash(&[Event::default()]), Events::empty_digest());
    assert_eq!(Actions::hash(&[]), Actions::empty_digest());
}

#[test]
fn test_dishonest_parts_fail_checked_pop() {
    let honest = LogStack::<Events>::from_events(&[Event::from([1])]);
    let mut dr = Dr::new();
    let forged = LogVar::<Dr, Events>::from_parts(
        &mut dr,
        Always(honest.digest()),
        Always(vec![Event::from([2])]),
    )
    .unwrap();
    forged.pop_checked(&mut dr).unwrap();
    assert!(!dr.is_satisfied());
}

#[test]
fn test_dishonest_parts_fail_native_pop() {
    let honest = LogStack::<Events>::from_events(&[Event::from([1]), Event::from([2])]);
    let mut frames: Vec<(Event, Fp)> = Vec::new();
    let mut below = honest.clone();
    while let Ok((event, digest)) = below.pop() {
        frames.push((event, digest));
    }
    frames[1].0 = Event::from([5]);
    let mut forged = LogStack::<Events>::from_parts(honest.digest(), frames);
    assert!(forged.pop().is_ok());
    assert_eq!(forged.pop(), Err(ZkappError::DigestMismatch { depth: 1 }));
}

// =============================================================================
// URIs
// =============================================================================

#[test]
fn test_uri_round_trips() {
    let mut rng = StdRng::seed_from_u64(11);
    for len in [0, 1, 31, 32, 200, MAX_URI_LENGTH] {
        let uri = random_uri(&mut rng, len);
        assert_eq!(ZkappUri::from_wire(&uri.to_wire()).unwrap(), uri);
        assert_eq!(ZkappUri::from_bits(&uri.to_bits()).unwrap(), uri);
    }
}

#[test]
fn test_uri_length_limit() {
    let too_long = vec![b'a'; MAX_URI_LENGTH + 1];
    assert!(matches!(
        ZkappUri::new(too_long.clone()),
        Err(ZkappError::UriTooLong { len: 256, max: 255 })
    ));
    assert!(ZkappUri::check(&too_long).is_err());
    assert!(ZkappUri::check(&too_long[1..]).is_ok());

    let mut dr = CountingDriver::<Fp>::new();
    assert!(ZkappUriVar::alloc_bits(&mut dr, MAX_URI_LENGTH + 1, Empty::new()).is_err());
}

#[test]
fn test_absent_uri_is_distinct() {
    let none = hash_zkapp_uri(None);
    assert_ne!(none, hash_zkapp_uri(Some(&ZkappUri::default())));
    for len in 1..=4 {
        let nulls = ZkappUri::new(vec![0u8; len]).unwrap();
        assert_ne!(none, hash_zkapp_uri(Some(&nulls)));
    }
    assert_ne!(
        ZkappUri::new(vec![0u8]).unwrap().hash(),
        ZkappUri::new(vec![0u8, 0]).unwrap().hash()
    );
}

#[test]
fn test_uri_null_bytes_never_collide() {
    let pairs: [(&[u8], &[u8]); 5] = [
        (b"", b"\0"),
        (b"a", b"\0a"),
        (b"a", b"a\0"),
        (b"\0a", b"a\0"),
        (&[b'!'; 32], b"!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!\0"),
    ];
    for (a, b) in pairs {
        let a = ZkappUri::new(a.to_vec()).unwrap();
        let b = ZkappUri::new(b.to_vec()).unwrap();
        assert_ne!(a.hash(), b.hash(), "{a:?} / {b:?}");

        for uri in [&a, &b] {
            let mut dr = Dr::new();
            let var = ZkappUriVar::alloc_bits(&mut dr, uri.len(), Always(uri.clone())).unwrap();
            assert_eq!(dr.get_witness(var.hash.wire), uri.hash());
            assert!(dr.is_satisfied());
        }
    }
}

#[test]
fn test_uri_null_padding_sweep() {
    let mut rng = StdRng::seed_from_u64(17);
    let none = hash_zkapp_uri(None);
    // Lengths straddle the 254-bit accumulator boundary (31 and 32 bytes
    // hold 248 and 256 data bits) and its multiples.
    for len in [0, 1, 2, 30, 31, 32, 33, 62, 63, 64, 65, 200, 252] {
        for _ in 0..4 {
            let base = random_uri(&mut rng, len).as_bytes().to_vec();
            let mut variants = vec![base.clone()];
            for k in 1..=3 {
                let nulls = vec![0u8; k];
                variants.push([&base[..], &nulls[..]].concat());
                variants.push([&nulls[..], &base[..]].concat());
            }

            let mut seen: Vec<(Vec<u8>, Fp)> = Vec::new();
            for bytes in variants {
                let digest = ZkappUri::new(bytes.clone()).unwrap().hash();
                assert_ne!(digest, none, "len {len}");
                for (other, other_digest) in &seen {
                    if *other != bytes {
                        assert_ne!(*other_digest, digest, "{other:?} / {bytes:?}");
                    }
                }
                seen.push((bytes, digest));
            }
        }
    }
}

#[test]
fn test_uri_bit_gadget_max_length() {
    let mut rng = StdRng::seed_from_u64(13);
    let uri = random_uri(&mut rng, MAX_URI_LENGTH);
    let mut dr = Dr::new();
    let var = ZkappUriVar::alloc_bits(&mut dr, MAX_URI_LENGTH, Always(uri.clone())).unwrap();
    assert_eq!(dr.get_witness(var.hash.wire), uri.hash());
    assert!(dr.check_constraints().is_ok());
}

// =============================================================================
// Accounts
// =============================================================================

#[test]
fn test_randomised_account_equivalence() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..8 {
        let account = random_account(&mut rng);
        let (digest, satisfied) = checked_digest(&account);
        assert!(satisfied);
        assert_eq!(digest, account.digest());
    }
}

#[test]
fn test_account_equivalence_edge_cases() {
    let mut rng = StdRng::seed_from_u64(99);

    let mut absent_vk = random_account(&mut rng);
    absent_vk.verification_key = None;

    let mut present_vk = random_account(&mut rng);
    present_vk.verification_key = Some(random_vk(&mut rng));

    let mut long_uri = random_account(&mut rng);
    long_uri.zkapp_uri = random_uri(&mut rng, MAX_URI_LENGTH);

    let mut zero_state = random_account(&mut rng);
    zero_state.app_state = [Fp::ZERO; MAX_STATE_SIZE];

    let mut populated = ZkappAccount::default();
    populated.apply_actions(&[Event::from([1, 2])], 1);
    populated.apply_actions(&[Event::from([3])], 2);

    for account in [absent_vk, present_vk, long_uri, zero_state, populated, ZkappAccount::default()] {
        let (digest, satisfied) = checked_digest(&account);
        assert!(satisfied);
        assert_eq!(digest, account.digest());
    }
}

#[test]
fn test_single_field_sensitivity() {
    let mut rng = StdRng::seed_from_u64(5);
    let base = random_account(&mut rng);
    let d = base.digest();

    for i in 0..MAX_STATE_SIZE {
        let mut a = base.clone();
        a.app_state[i] += Fp::ONE;
        assert_ne!(a.digest(), d, "app_state[{i}]");
    }
    for i in 0..SEQUENCE_STATE_LEN {
        let mut a = base.clone();
        a.sequence_state[i] += Fp::ONE;
        assert_ne!(a.digest(), d, "sequence_state[{i}]");
    }

    let mut a = base.clone();
    a.verification_key = match a.verification_key {
        Some(_) => None,
        None => Some(random_vk(&mut rng)),
    };
    assert_ne!(a.digest(), d);

    let mut a = base.clone();
    a.zkapp_version = a.zkapp_version.wrapping_add(1);
    assert_ne!(a.digest(), d);

    let mut a = base.clone();
    a.last_sequence_slot = a.last_sequence_slot.wrapping_add(1);
    assert_ne!(a.digest(), d);

    let mut a = base.clone();
    a.proved_state = !a.proved_state;
    assert_ne!(a.digest(), d);

    let mut a = base.clone();
    let mut bytes = a.zkapp_uri.as_bytes().to_vec();
    bytes.push(0);
    bytes.truncate(MAX_URI_LENGTH);
    if bytes == a.zkapp_uri.as_bytes() {
        bytes[0] ^= 1;
    }
    a.zkapp_uri = ZkappUri::new(bytes).unwrap();
    assert_ne!(a.digest(), d);
}

#[test]
fn test_absent_vk_uses_dummy_hash() {
    let account = ZkappAccount::default();
    let mut with_dummy = account.clone();
    with_dummy.verification_key = Some(VerificationKeyWithHash::new(VerificationKey::dummy()));
    assert_eq!(
        with_dummy.verification_key.as_ref().map(|vk| vk.hash),
        Some(dummy_vk_hash())
    );
    // The commitment only sees the hash.
    assert_eq!(with_dummy.digest(), account.digest());
}

#[test]
fn test_action_window_feeds_digest() {
    let mut account = ZkappAccount::default();
    let before = account.digest();
    account.apply_actions(&[], 3);
    assert_eq!(account.digest(), before);

    account.apply_actions(&[Event::from([1])], 3);
    assert_eq!(account.last_sequence_slot, 3);
    assert_eq!(account.sequence_state[1], Actions::empty_state_element());
    assert_ne!(account.digest(), before);
}

#[test]
fn test_versioned_json_round_trip() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut account = random_account(&mut rng);
    // Binary bytes, not valid UTF-8.
    let mut bytes = vec![0xff, 0x00];
    bytes.extend(random_uri(&mut rng, 64).as_bytes());
    account.zkapp_uri = ZkappUri::new(bytes).unwrap();
    let json = account_to_json(&account).unwrap();
    let decoded = account_from_json(&json).unwrap();
    assert_eq!(decoded, account);
    assert_eq!(decoded.digest(), account.digest());
}

// =============================================================================
// Circuit
// =============================================================================

#[test]
fn test_circuit_prove_and_verify_paths() {
    let mut rng = StdRng::seed_from_u64(3);
    let account = random_account(&mut rng);
    let circuit = AccountDigestCircuit;

    let proved = circuit.prove(&account).unwrap();
    assert_eq!(proved, vec![account.digest()]);
    assert_eq!(circuit.public_inputs(account.digest()).unwrap(), proved);
    assert_ne!(circuit.public_inputs(Fp::ZERO).unwrap(), proved);
}

#[test]
fn test_circuit_shape_is_witness_independent() {
    let (stats, public) = AccountDigestCircuit.stats().unwrap();
    assert_eq!(public, 1);

    let mut rng = StdRng::seed_from_u64(8);
    let account = random_account(&mut rng);
    let mut dr = Dr::new();
    let var = ZkappAccountVar::alloc(&mut dr, Always(&account)).unwrap();
    var.digest(&mut dr).unwrap();
    assert_eq!(dr.num_mul(), stats.num_mul);
}
