//! Tests for the editing session: stable ids, history and the executable gate.
mod common;
use common::*;
use rfcmap::prelude::*;

fn open(def: &InterfaceDefinition) -> Editor {
    Editor::open(def, MapperConfig::default())
}

#[test]
fn test_ids_survive_sibling_removal() {
    let mut editor = open(&create_three_row_definition());
    let b = editor.scalar_id(ScalarKind::Import, 1).unwrap();
    let c = editor.scalar_id(ScalarKind::Import, 2).unwrap();

    editor.remove(b, Confirmation::Unconfirmed).unwrap();

    // Positionally, the former index-2 row is now at index 1.
    assert_eq!(editor.definition().import_mapping[1].web_field, "c");
    assert_eq!(
        editor.locate(c),
        Some(Location::Scalar {
            kind: ScalarKind::Import,
            index: 1
        })
    );
    assert_eq!(editor.locate(b), None);
    assert_eq!(
        editor.edit_field(b, FieldEdit::Example("x".into())),
        Err(EditError::UnknownElement(b.get()))
    );
}

#[test]
fn test_positional_mutations_keep_ids_in_step() {
    let mut editor = open(&create_three_row_definition());
    let c = editor.scalar_id(ScalarKind::Import, 2).unwrap();

    editor
        .apply(Mutation::RemoveRow {
            kind: MappingKind::Import,
            index: 0,
            confirmation: Confirmation::Unconfirmed,
        })
        .unwrap();

    editor.edit_field(c, FieldEdit::Example("z".into())).unwrap();
    assert_eq!(editor.definition().import_mapping[1].example, "z");
}

#[test]
fn test_table_and_column_ids() {
    let mut editor = open(&create_order_definition());
    let table = editor.add_table_block(TableKind::Input);
    let col = editor.add_field(table).unwrap();
    editor.edit_field(col, FieldEdit::WebField("note".into())).unwrap();
    editor.edit_table(table, TableEdit::WebList("notes".into())).unwrap();

    assert_eq!(
        editor.locate(col),
        Some(Location::Field {
            kind: TableKind::Input,
            table: 1,
            field: 0
        })
    );

    let items = editor.table_id(TableKind::Input, 0).unwrap();
    editor.remove(items, Confirmation::Unconfirmed).unwrap();

    assert_eq!(
        editor.locate(col),
        Some(Location::Field {
            kind: TableKind::Input,
            table: 0,
            field: 0
        })
    );
    assert_eq!(editor.definition().table_mapping[0].web_list, "notes");
    assert_eq!(editor.definition().table_mapping[0].fields[0].web_field, "note");
}

#[test]
fn test_add_field_requires_a_table_id() {
    let mut editor = open(&create_order_definition());
    let row = editor.scalar_id(ScalarKind::Import, 0).unwrap();

    assert_eq!(
        editor.add_field(row),
        Err(EditError::UnknownElement(row.get()))
    );
    assert!(editor.edit_table(row, TableEdit::Required(true)).is_err());
}

#[test]
fn test_reserved_removal_leaves_session_untouched() {
    let mut editor = Editor::create("NEW", MapperConfig::default());
    let status = editor.scalar_id(ScalarKind::Export, 0).unwrap();

    let err = editor.remove(status, Confirmation::Unconfirmed).unwrap_err();

    assert!(matches!(
        err,
        EditError::Mutation(MutationError::ConfirmationRequired { .. })
    ));
    assert_eq!(editor.definition().export_mapping.len(), 2);
    assert!(!editor.can_undo());

    editor.remove(status, Confirmation::Confirmed).unwrap();
    assert_eq!(editor.definition().export_mapping.len(), 1);
}

#[test]
fn test_undo_redo() {
    let def = create_three_row_definition();
    let mut editor = open(&def);
    let a = editor.scalar_id(ScalarKind::Import, 0).unwrap();

    editor.remove(a, Confirmation::Unconfirmed).unwrap();
    editor.add_scalar_row(ScalarKind::Export);
    assert!(editor.is_dirty());

    editor.undo().unwrap();
    editor.undo().unwrap();
    assert_eq!(editor.definition(), &def);
    assert!(!editor.is_dirty());
    assert_eq!(editor.locate(a), Some(Location::Scalar { kind: ScalarKind::Import, index: 0 }));
    assert_eq!(editor.undo(), Err(EditError::NoHistory("undo")));

    editor.redo().unwrap();
    assert_eq!(editor.definition().import_mapping.len(), 2);
    assert_eq!(editor.locate(a), None);

    editor.add_scalar_row(ScalarKind::Import);
    assert!(!editor.can_redo(), "a new edit drops the redo branch");
}

#[test]
fn test_reset_after_save() {
    let mut editor = Editor::create("NEW", MapperConfig::default());
    assert!(editor.is_new());
    editor
        .edit_header(HeaderEdit::RfcFunction("Z_NEW".into()))
        .unwrap();
    assert!(editor.is_dirty());

    let saved = editor.definition().clone();
    editor.reset(&saved);

    assert!(!editor.is_new());
    assert!(!editor.is_dirty());
    assert!(!editor.can_undo());
}

#[test]
fn test_execute_requires_executable_flag() {
    let mut def = create_order_definition();
    def.executable = false;
    let mut editor = open(&def);

    assert_eq!(
        editor.execute(None),
        Err(EditError::NotExecutable("ORDER_CREATE".to_string()))
    );
    assert_eq!(editor.preview(None).data["plant"], "1000");

    editor.edit_header(HeaderEdit::Executable(true)).unwrap();
    let payload = editor.execute(Some("bob")).unwrap();
    assert_eq!(payload.user_id, "bob");
}

#[test]
fn test_configured_default_user() {
    let config = MapperConfig::builder().with_default_user_id("qa-user").build();
    let editor = Editor::open(&create_order_definition(), config);

    assert_eq!(editor.execute(None).unwrap().user_id, "qa-user");
}

#[test]
fn test_history_depth_is_bounded() {
    let config = MapperConfig::builder().with_history_limit(3).build();
    let mut editor = Editor::open(&create_three_row_definition(), config);

    for _ in 0..5 {
        editor.add_scalar_row(ScalarKind::Export);
    }
    for _ in 0..3 {
        editor.undo().unwrap();
    }

    assert_eq!(editor.undo(), Err(EditError::NoHistory("undo")));
    assert_eq!(editor.definition().export_mapping.len(), 2);

    for _ in 0..3 {
        editor.redo().unwrap();
    }
    assert_eq!(editor.definition().export_mapping.len(), 5);
    assert!(!editor.can_redo());
}

#[test]
fn test_default_history_limit() {
    let mut editor = open(&create_three_row_definition());
    for _ in 0..rfcmap::config::DEFAULT_HISTORY_LIMIT + 10 {
        editor.add_scalar_row(ScalarKind::Import);
    }

    let mut steps = 0;
    while editor.undo().is_ok() {
        steps += 1;
    }
    assert_eq!(steps, rfcmap::config::DEFAULT_HISTORY_LIMIT);
}
