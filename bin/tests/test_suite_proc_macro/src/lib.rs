use quote::{format_ident, quote};

/// Generates one test per `.lox` file below `bin/tests/<mode>/`.
///
/// The first directory component of the path names the mode the file is run in.
#[proc_macro]
pub fn generate_tests(_: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let root_dir = format!("{}/..", env!("CARGO_MANIFEST_DIR"));
    let mut entries = walkdir::WalkDir::new(root_dir.clone())
        .into_iter()
        .flatten()
        .filter(|entry| entry.path().extension() == Some("lox".as_ref()))
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let tests = entries.iter().map(|entry| {
        let test_file_path = entry.path().to_string_lossy();
        let relative_test_path = entry.path().strip_prefix(&root_dir).unwrap();
        let mode = relative_test_path
            .components()
            .next()
            .unwrap()
            .as_os_str()
            .to_string_lossy()
            .into_owned();
        let test_ident = format_ident!(
            "test_{}",
            relative_test_path.to_string_lossy().replace('/', "_").replace(".lox", "")
        );
        quote! {
            #[test]
            fn #test_ident() {
                lox_expect(#mode, &std::fs::read(#test_file_path).unwrap());
            }
        }
    });

    quote! {
        #[ctor::ctor]
        fn init() {
            env_logger::init();
        }

        #(#tests)*
    }
    .into()
}
