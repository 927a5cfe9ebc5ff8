use super::*;

#[test]
fn acquire_from_empty_pool_allocates() {
    let mut pool = VectorPool::new(4);
    let v = pool.acquire(Point::new(1.0, 2.0));
    assert_eq!(v.get(), Point::new(1.0, 2.0));

    let st = pool.stats();
    assert_eq!(st.allocated, 1);
    assert_eq!(st.reused, 0);
    assert_eq!(st.outstanding, 1);
}

#[test]
fn released_points_are_reused_with_new_coordinates() {
    let mut pool = VectorPool::new(4);
    let v = pool.acquire(Point::new(1.0, 2.0));
    assert!(pool.release(v));
    assert_eq!(pool.available(), 1);

    let w = pool.acquire(Point::new(9.0, -3.0));
    assert_eq!(w.get(), Point::new(9.0, -3.0));
    assert_eq!(pool.available(), 0);

    let st = pool.stats();
    assert_eq!(st.allocated, 1);
    assert_eq!(st.reused, 1);
    assert_eq!(st.outstanding, 1);
}

#[test]
fn overflow_is_discarded() {
    let mut pool = VectorPool::new(2);
    let held: Vec<_> = (0..5)
        .map(|i| pool.acquire(Point::new(f64::from(i), 0.0)))
        .collect();
    let retained: Vec<bool> = held.into_iter().map(|v| pool.release(v)).collect();

    assert_eq!(retained, vec![true, true, false, false, false]);
    assert_eq!(pool.available(), 2);

    let st = pool.stats();
    assert_eq!(st.retained, 2);
    assert_eq!(st.released, 5);
    assert_eq!(st.dropped_on_release, 3);
    assert_eq!(st.outstanding, 0);
}

#[test]
fn zero_capacity_pool_never_retains() {
    let mut pool = VectorPool::new(0);
    let v = pool.acquire(Point::ORIGIN);
    assert!(!pool.release(v));
    assert_eq!(pool.available(), 0);
}

#[test]
fn default_capacity_is_five_hundred() {
    assert_eq!(VectorPool::default().capacity(), 500);
}

#[test]
fn shrinking_capacity_drops_surplus_free_points() {
    let mut pool = VectorPool::new(8);
    let points: Vec<_> = (0..6).map(|i| pool.acquire(Point::new(f64::from(i), 0.0))).collect();
    for p in points {
        pool.release(p);
    }
    assert_eq!(pool.available(), 6);

    pool.set_capacity(2);
    assert_eq!(pool.capacity(), 2);
    assert_eq!(pool.available(), 2);
    assert_eq!(pool.stats().retained, 2);

    let v = pool.acquire(Point::ORIGIN);
    let w = pool.acquire(Point::ORIGIN);
    let x = pool.acquire(Point::ORIGIN);
    assert!(pool.release(v));
    assert!(pool.release(w));
    assert!(!pool.release(x));
}
