use flagset_core::{Binding, Element, FlagError, FlagSet, FlagValue, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn repeat_flag(flag: &str, values: &[&str]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| [flag.to_string(), value.to_string()])
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// One row of a slice flag table.
struct Case<T> {
    name: &'static str,
    default: Vec<T>,
    input: &'static [&'static str],
    expected_err: Option<&'static str>,
    expected: Vec<T>,
    replace_with: Option<&'static [&'static str]>,
}

impl<T> Case<T> {
    fn ok(name: &'static str, default: Vec<T>, input: &'static [&'static str], expected: Vec<T>) -> Self {
        Self {
            name,
            default,
            input,
            expected_err: None,
            expected,
            replace_with: None,
        }
    }

    fn err(name: &'static str, input: &'static [&'static str], expected_err: &'static str) -> Self {
        Self {
            name,
            default: Vec::new(),
            input,
            expected_err: Some(expected_err),
            expected: Vec::new(),
            replace_with: None,
        }
    }

    fn replaced(mut self, tokens: &'static [&'static str]) -> Self {
        self.replace_with = Some(tokens);
        self
    }
}

/// Registers `flag` through the generic binding API, parses the repeated
/// occurrences, and checks the variable, the typed getter and the generic
/// getter all agree.
fn run_cases<T: Element>(flag: &str, cases: Vec<Case<T>>) {
    for case in cases {
        let dest = Binding::new(Vec::new());
        let mut flags = FlagSet::new("test");
        flags
            .slice_var(&dest, flag, case.default.clone(), "usage")
            .unwrap();

        let result = flags.parse(repeat_flag(&format!("--{flag}"), case.input));
        if let Some(expected_err) = case.expected_err {
            let err = result.expect_err(case.name);
            assert_eq!(err.to_string(), expected_err, "{}", case.name);
            continue;
        }
        result.unwrap_or_else(|err| panic!("{}: unexpected error {err}", case.name));

        if let Some(tokens) = case.replace_with {
            flags.visit_all(|f| {
                if let Some(slice) = f.value_mut().as_slice_value_mut() {
                    slice.replace(&strings(tokens)).unwrap();
                }
            });
        }

        assert_eq!(dest.get(), case.expected, "{}", case.name);

        let typed = flags.get_slice::<T>(flag).unwrap();
        assert_eq!(typed, case.expected, "{}", case.name);

        let generic = flags.get(flag).unwrap();
        assert_eq!(generic, T::into_slice_flag_value(typed), "{}", case.name);
    }
}

// ---------------------------------------------------------------------------
// int32 slices
// ---------------------------------------------------------------------------

#[test]
fn test_int32_slice() {
    run_cases::<i32>(
        "i32s",
        vec![
            Case::ok("no value passed", vec![], &[], vec![]),
            Case::err(
                "empty value passed",
                &[""],
                r#"invalid argument "" for "--i32s" flag: parse_int: parsing "": invalid syntax"#,
            ),
            Case::err(
                "invalid int32",
                &["blabla"],
                r#"invalid argument "blabla" for "--i32s" flag: parse_int: parsing "blabla": invalid syntax"#,
            ),
            Case::err(
                "no csv",
                &["1,5"],
                r#"invalid argument "1,5" for "--i32s" flag: parse_int: parsing "1,5": invalid syntax"#,
            ),
            Case::err(
                "out of range",
                &["2147483648"],
                r#"invalid argument "2147483648" for "--i32s" flag: parse_int: parsing "2147483648": value out of range"#,
            ),
            Case::ok("empty defaults", vec![], &["1", "5"], vec![1, 5]),
            Case::ok("with default values", vec![1, 5], &["5", "1"], vec![5, 1]),
            Case::ok("keeps defaults", vec![1, 5], &[], vec![1, 5]),
            Case::ok(
                "trims input",
                vec![],
                &["    1", "2    ", "   3  "],
                vec![1, 2, 3],
            ),
            Case::ok("replace values", vec![], &["5", "1"], vec![3]).replaced(&["3"]),
        ],
    );
}

// ---------------------------------------------------------------------------
// uint slices
// ---------------------------------------------------------------------------

#[test]
fn test_uint_slice() {
    run_cases::<usize>(
        "uis",
        vec![
            Case::ok("no value passed", vec![], &[], vec![]),
            Case::err(
                "empty value passed",
                &[""],
                r#"invalid argument "" for "--uis" flag: parse_uint: parsing "": invalid syntax"#,
            ),
            Case::err(
                "invalid uint",
                &["blabla"],
                r#"invalid argument "blabla" for "--uis" flag: parse_uint: parsing "blabla": invalid syntax"#,
            ),
            Case::err(
                "no csv",
                &["1,5"],
                r#"invalid argument "1,5" for "--uis" flag: parse_uint: parsing "1,5": invalid syntax"#,
            ),
            Case::err(
                "negative",
                &["-1"],
                r#"invalid argument "-1" for "--uis" flag: parse_uint: parsing "-1": invalid syntax"#,
            ),
            Case::ok("empty defaults", vec![], &["1", "5"], vec![1, 5]),
            Case::ok("overrides default values", vec![1, 5], &["5", "1"], vec![5, 1]),
            Case::ok("with default values", vec![1, 5], &[], vec![1, 5]),
            Case::ok(
                "trims input",
                vec![],
                &["    1", "2    ", "   3  "],
                vec![1, 2, 3],
            ),
            Case::ok("replace values", vec![], &["5", "1"], vec![3]).replaced(&["3"]),
        ],
    );
}

// ---------------------------------------------------------------------------
// string slices
// ---------------------------------------------------------------------------

#[test]
fn test_string_slice() {
    run_cases::<String>(
        "ss",
        vec![
            Case::ok("no value passed", vec![], &[], vec![]),
            Case::ok("empty value passed", vec![], &[""], strings(&[""])),
            Case::ok("single string", vec![], &["blabla"], strings(&["blabla"])),
            Case::ok(
                "no csv",
                vec![],
                &["testing,something"],
                strings(&["testing,something"]),
            ),
            Case::ok(
                "multiple values passed",
                vec![],
                &["testing", "something", "all the strings"],
                strings(&["testing", "something", "all the strings"]),
            ),
            Case::ok(
                "with default values",
                strings(&["testing", "0:0:0:0:0:0:0:1"]),
                &[],
                strings(&["testing", "0:0:0:0:0:0:0:1"]),
            ),
            Case::ok(
                "overrides default values",
                strings(&["testing", "0:0:0:0:0:0:0:1"]),
                &["all the strings", "testing"],
                strings(&["all the strings", "testing"]),
            ),
            Case::ok(
                "as slice values",
                vec![],
                &["testing", "all the strings"],
                strings(&["overridden"]),
            )
            .replaced(&["overridden"]),
            Case::ok(
                "keeps spacing",
                vec![],
                &["somestring", "        somestring", "somestring     ", "   somestring  "],
                strings(&["somestring", "        somestring", "somestring     ", "   somestring  "]),
            ),
            Case::ok(
                "keeps new lines",
                vec![],
                &["foo\nbar\nbaz\n\n\nasdasd\n\n"],
                strings(&["foo\nbar\nbaz\n\n\nasdasd\n\n"]),
            ),
        ],
    );
}

// ---------------------------------------------------------------------------
// Other element types
// ---------------------------------------------------------------------------

#[test]
fn test_other_numeric_slices() {
    run_cases::<i64>(
        "i64s",
        vec![
            Case::ok("negatives", vec![0], &["-9223372036854775808", "+7"], vec![i64::MIN, 7]),
            Case::err(
                "float is not an int",
                &["1.5"],
                r#"invalid argument "1.5" for "--i64s" flag: parse_int: parsing "1.5": invalid syntax"#,
            ),
        ],
    );
    run_cases::<u32>(
        "u32s",
        vec![
            Case::ok("max", vec![], &["4294967295"], vec![u32::MAX]),
            Case::err(
                "overflow",
                &["4294967296"],
                r#"invalid argument "4294967296" for "--u32s" flag: parse_uint: parsing "4294967296": value out of range"#,
            ),
        ],
    );
    run_cases::<u64>(
        "u64s",
        vec![Case::ok("defaults replaced", vec![1, 2, 3], &["4"], vec![4])],
    );
    run_cases::<f64>(
        "f64s",
        vec![
            Case::ok("decimals", vec![], &["1.5", " -2e3 "], vec![1.5, -2000.0]),
            Case::err(
                "garbage",
                &["one"],
                r#"invalid argument "one" for "--f64s" flag: parse_float: parsing "one": invalid syntax"#,
            ),
        ],
    );
    run_cases::<bool>(
        "bs",
        vec![
            Case::ok("spellings", vec![false], &["true", "F", " 1 "], vec![true, false, true]),
            Case::err(
                "empty",
                &[""],
                r#"invalid argument "" for "--bs" flag: parse_bool: parsing "": invalid syntax"#,
            ),
        ],
    );
}

// ---------------------------------------------------------------------------
// Capability checks and bulk operations
// ---------------------------------------------------------------------------

#[test]
fn test_only_slices_expose_bulk_capability() {
    let mut flags = FlagSet::new("test");
    flags.int32_slice("i32s", vec![], "usage").unwrap();
    flags.int32("i32", 0, "usage").unwrap();
    flags.bool("verbose", false, "usage").unwrap();

    let mut capable = Vec::new();
    flags.visit_all(|flag| {
        if flag.value_mut().as_slice_value_mut().is_some() {
            capable.push(flag.name().to_string());
        }
    });
    assert_eq!(capable, ["i32s"]);
}

#[test]
fn test_replace_is_atomic_through_flag_set() {
    let mut flags = FlagSet::new("test");
    let i32s = flags.int32_slice("i32s", vec![], "usage").unwrap();
    flags.parse(repeat_flag("--i32s", &["5", "1"])).unwrap();

    let err = flags
        .replace_slice("i32s", &strings(&["1", "x"]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"invalid argument "x" for "--i32s" flag: parse_int: parsing "x": invalid syntax"#
    );
    assert_eq!(i32s.get(), vec![5, 1]);
}

#[test]
fn test_get_slice_round_trips_through_replace() {
    let mut flags = FlagSet::new("test");
    let f64s = flags.float64_slice("f64s", vec![], "usage").unwrap();
    flags
        .parse(repeat_flag("--f64s", &["0.1", "-3.25", "1e21"]))
        .unwrap();

    let flag = flags.lookup("f64s").unwrap();
    let rendered = flag.value().as_slice_value().unwrap().get_slice();
    let before = f64s.get();

    flags.replace_slice("f64s", &rendered).unwrap();
    assert_eq!(f64s.get(), before);
}

#[test]
fn test_append_after_parse_keeps_occurrences() {
    let mut flags = FlagSet::new("test");
    let ss = flags
        .string_slice("ss", strings(&["default"]), "usage")
        .unwrap();
    flags.parse(repeat_flag("--ss", &["a"])).unwrap();

    let flag = flags.lookup_mut("ss").unwrap();
    let slice = flag.value_mut().as_slice_value_mut().unwrap();
    slice.append("b").unwrap();
    assert_eq!(ss.get(), strings(&["a", "b"]));
}

#[test]
fn test_append_slice_reports_like_parse() {
    let mut flags = FlagSet::new("test");
    let i32s = flags.int32_slice("i32s", vec![], "usage").unwrap();
    flags.parse(repeat_flag("--i32s", &["5"])).unwrap();

    flags.append_slice("i32s", "6").unwrap();
    let err = flags.append_slice("i32s", "1,5").unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"invalid argument "1,5" for "--i32s" flag: parse_int: parsing "1,5": invalid syntax"#
    );
    assert_eq!(i32s.get(), vec![5, 6]);
}

#[test]
fn test_binding_snapshot_held_across_parse() {
    let mut flags = FlagSet::new("test");
    let i32s = flags.int32_slice("i32s", vec![1], "usage").unwrap();

    let before = i32s.get();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        flags.parse(repeat_flag("--i32s", &["2", "3"]))
    }));
    assert!(result.expect("parse must not panic").is_ok());
    assert_eq!(before, vec![1]);
    assert_eq!(i32s.get(), vec![2, 3]);
    assert_eq!(flags.lookup("i32s").unwrap().value().to_string(), "2,3");
}

#[test]
fn test_rebinding_resets_changed_state() {
    let dest = Binding::new(Vec::new());

    let mut first = FlagSet::new("first");
    first.uint_slice_var(&dest, "uis", vec![1], "usage").unwrap();
    first.parse(repeat_flag("--uis", &["2", "3"])).unwrap();
    assert_eq!(dest.get(), vec![2, 3]);

    let mut second = FlagSet::new("second");
    second.uint_slice_var(&dest, "uis", vec![9], "usage").unwrap();
    assert_eq!(dest.get(), vec![9]);
    second.parse(repeat_flag("--uis", &["4"])).unwrap();
    assert_eq!(dest.get(), vec![4]);
    assert_eq!(first.lookup("uis").unwrap().value().to_string(), "4");
}

// ---------------------------------------------------------------------------
// Custom values
// ---------------------------------------------------------------------------

/// Counts occurrences; has no slice capability.
#[derive(Debug, Default)]
struct Counter(usize);

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Value for Counter {
    fn set(&mut self, _token: &str) -> Result<(), flagset_core::ParseError> {
        self.0 += 1;
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        "count"
    }

    fn get(&self) -> FlagValue {
        FlagValue::Uint(self.0)
    }

    fn no_opt_default(&self) -> Option<&'static str> {
        Some("+1")
    }
}

#[test]
fn test_custom_value_without_capability() {
    let mut flags = FlagSet::new("test");
    flags
        .add_flag("v", "verbosity", Box::new(Counter::default()))
        .unwrap();
    flags.parse(["--v", "--v", "--v"]).unwrap();

    assert_eq!(flags.get("v").unwrap(), FlagValue::Uint(3));
    assert_eq!(
        flags.get_uint("v").unwrap_err(),
        FlagError::TypeMismatch {
            name: "v".to_string(),
            expected: "uint",
            actual: "count",
        }
    );
    assert_eq!(
        flags.replace_slice("v", &strings(&["1"])).unwrap_err(),
        FlagError::NotASlice("v".to_string())
    );
}

#[test]
fn test_independent_instances_in_parallel() {
    let handles: Vec<_> = (0..4u32)
        .map(|n| {
            std::thread::spawn(move || {
                let mut flags = FlagSet::new("test");
                let u32s = flags.uint32_slice("u32s", vec![], "usage").unwrap();
                let tokens: Vec<String> = (0..=n).map(|i| i.to_string()).collect();
                let refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
                flags.parse(repeat_flag("--u32s", &refs)).unwrap();
                u32s.get()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let expected: Vec<u32> = (0..=n as u32).collect();
        assert_eq!(handle.join().unwrap(), expected);
    }
}
