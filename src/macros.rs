/// Build a `Default` value with a handful of fields overridden, ie
/// `new_t!(NeatConfig, crossover_rate = 0.5, snapshot = true)`
#[macro_export]
macro_rules! new_t {
    ($t:ty, $($k:ident = $v:expr),+ $(,)?) => {{
        let mut c = <$t>::default();
        $(c.$k = $v;)+
        c
    }};
    ($($k:ident = $v:expr),+ $(,)?) => {new_t!(T, $($k = $v,)+)};
}

/// Stamp out one test per listed type, with the type bound to `T` inside the body
#[macro_export]
macro_rules! test_t {
  ( #[should_panic(expected = $panic_msg:literal)]
    $name:ident[T: $($impl:ty)|*]() $body:tt ) => {$(
      ::paste::paste! {
          #[test]
          #[should_panic(expected = $panic_msg)]
          fn [<$name _ $impl:snake>]() {
            type T=$impl;
            $body
          }
      }
  )+};
  ($name:ident[T: $($impl:ty)|*]() $body:tt ) => {$(
      ::paste::paste! {
          #[test]
          fn [<test_ $name _ $impl:snake>]() {
            type T=$impl;
            $body
          }
      }
  )+};
}

/// Assert two floats lie within `epsilon` of each other, `1e-9` unless given
#[macro_export]
macro_rules! assert_f64_approx {
    ($l:expr, $r:expr, epsilon = $eps:expr $(,)?) => {{
        let (l, r, eps): (f64, f64, f64) = ($l, $r, $eps);
        assert!((l - r).abs() <= eps, "{l} is not within {eps} of {r}");
    }};
    ($l:expr, $r:expr $(,)?) => {
        $crate::assert_f64_approx!($l, $r, epsilon = 1e-9)
    };
}
