use super::*;
use crate::theme::palette::PaletteTable;

fn opening() -> Palette {
    PaletteTable::builtin().get("opening").unwrap().clone()
}

#[test]
fn blob_count_and_ranges_follow_the_seed() {
    let a = Backdrop::new(11, &opening());
    let b = Backdrop::new(11, &opening());
    assert_eq!(a.blobs(), b.blobs());
    assert!((6..=8).contains(&a.blobs().len()));
    for blob in a.blobs() {
        assert!((250.0..600.0).contains(&blob.size_px));
        assert!((0.2..0.4).contains(&blob.opacity));
        assert!((0.0..100.0).contains(&blob.pos.x));
    }
}

#[test]
fn drift_keeps_blobs_in_bounds_and_speed_clamped() {
    let mut bd = Backdrop::new(3, &opening());
    for _ in 0..20_000 {
        bd.drift(0.05);
    }
    for blob in bd.blobs() {
        assert!((BOUND_LO..=BOUND_HI).contains(&blob.pos.x));
        assert!((BOUND_LO..=BOUND_HI).contains(&blob.pos.y));
        assert!(blob.vel.x.abs() <= MAX_SPEED);
        assert!(blob.vel.y.abs() <= MAX_SPEED);
    }
}

#[test]
fn recolor_follows_palette_cycle() {
    let table = PaletteTable::builtin();
    let finale = table.get("finale").unwrap();
    let mut bd = Backdrop::new(5, &opening());
    bd.recolor(finale);
    for (i, blob) in bd.blobs().iter().enumerate() {
        assert_eq!(Some(blob.color), finale.blob_color(i));
    }
}
