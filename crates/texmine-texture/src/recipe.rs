// Recipe ingestion and base-texture resolution
//
// Crafting recipes come in two legal shapes: a keyed pattern whose "#"
// symbol names the ingredient (one entry or a list of alternatives), or a
// positional ingredient list. The resolver walks candidate slots in order
// and returns the first ingredient whose texture actually exists, after
// applying the known-mismatch rewrites.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::DeriveError;

/// Candidate ingredients of one recipe, tagged by recipe shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeIngredients {
    /// From the "#" symbol of a shaped recipe's key.
    Keyed(Vec<String>),
    /// From a shapeless recipe's ingredient list.
    Positional(Vec<String>),
}

impl RecipeIngredients {
    pub fn candidates(&self) -> &[String] {
        match self {
            RecipeIngredients::Keyed(items) | RecipeIngredients::Positional(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecipe {
    #[serde(default)]
    key: Option<HashMap<String, KeySlot>>,
    #[serde(default)]
    ingredients: Option<Vec<ItemRef>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KeySlot {
    One(ItemRef),
    Many(Vec<ItemRef>),
}

/// An ingredient reference: a bare identifier string in newer data packs,
/// or an `{"item": ...}` object in older ones. Tag-only objects carry no
/// usable identifier.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemRef {
    Name(String),
    Object {
        #[serde(default)]
        item: Option<String>,
    },
}

impl ItemRef {
    fn item(&self) -> Option<&str> {
        match self {
            ItemRef::Name(name) => Some(name),
            ItemRef::Object { item } => item.as_deref(),
        }
    }
}

/// Parse recipe JSON into its candidate ingredient list.
pub fn parse_recipe(json: &str) -> Result<RecipeIngredients, DeriveError> {
    let raw: RawRecipe = serde_json::from_str(json)
        .map_err(|err| DeriveError::MalformedRecipe(err.to_string()))?;

    if let Some(key) = raw.key {
        let slot = key.get("#").ok_or_else(|| {
            DeriveError::MalformedRecipe("shaped recipe without a '#' symbol".to_string())
        })?;
        let items = match slot {
            KeySlot::One(item) => collect_items(std::slice::from_ref(item)),
            KeySlot::Many(items) => collect_items(items),
        };
        if items.is_empty() {
            return Err(DeriveError::MalformedRecipe(
                "no item identifiers in recipe key".to_string(),
            ));
        }
        return Ok(RecipeIngredients::Keyed(items));
    }

    if let Some(ingredients) = raw.ingredients {
        let items = collect_items(&ingredients);
        if items.is_empty() {
            return Err(DeriveError::MalformedRecipe(
                "no item identifiers in ingredient list".to_string(),
            ));
        }
        return Ok(RecipeIngredients::Positional(items));
    }

    Err(DeriveError::MalformedRecipe(
        "recipe has neither a key nor an ingredient list".to_string(),
    ))
}

fn collect_items(refs: &[ItemRef]) -> Vec<String> {
    refs.iter()
        .filter_map(|r| r.item().map(String::from))
        .collect()
}

/// Resolve the base texture a composite product derives from.
///
/// Slots are tried in recipe order. Each candidate has its namespace
/// stripped, then the waxed-copper alias and the ordered exception table
/// applied, before the existence check. First existing candidate wins.
pub fn resolve_base<F>(
    recipe: &RecipeIngredients,
    exceptions: &[(&str, &str)],
    texture_exists: F,
) -> Result<String, DeriveError>
where
    F: Fn(&str) -> bool,
{
    for raw in recipe.candidates() {
        let name = strip_namespace(raw);
        let name = rewrite_candidate(name, exceptions, &texture_exists);
        if texture_exists(&name) {
            return Ok(name);
        }
    }
    Err(DeriveError::BaseNotFound)
}

fn strip_namespace(id: &str) -> &str {
    match id.split_once(':') {
        Some((_, rest)) => rest,
        None => id,
    }
}

fn rewrite_candidate<F>(name: &str, exceptions: &[(&str, &str)], texture_exists: &F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut name = name.to_string();

    // Waxed copper blocks reuse the texture of the unwaxed variant.
    if name.contains("copper") {
        let stripped = name.replace("waxed_", "");
        if texture_exists(&stripped) {
            return stripped;
        }
        name = stripped;
    }

    for (from, to) in exceptions {
        if name == *from {
            name = (*to).to_string();
            if texture_exists(&name) {
                return name;
            }
        }
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::catalog::JAVA_TEXTURE_EXCEPTIONS;

    fn exists_in<'a>(present: &'a [&'a str]) -> impl Fn(&str) -> bool + 'a {
        move |name| present.contains(&name)
    }

    #[test]
    fn parses_keyed_recipe_with_single_ingredient() {
        let json = r####"{"type": "minecraft:crafting_shaped",
            "key": {"#": {"item": "minecraft:oak_planks"}},
            "pattern": ["###"]}"####;
        assert_eq!(
            parse_recipe(json).unwrap(),
            RecipeIngredients::Keyed(vec!["minecraft:oak_planks".to_string()])
        );
    }

    #[test]
    fn parses_keyed_recipe_with_alternatives() {
        let json = r##"{"key": {"#": [
            {"item": "minecraft:quartz_block"},
            {"item": "minecraft:quartz_pillar"}]}}"##;
        assert_eq!(
            parse_recipe(json).unwrap(),
            RecipeIngredients::Keyed(vec![
                "minecraft:quartz_block".to_string(),
                "minecraft:quartz_pillar".to_string()
            ])
        );
    }

    #[test]
    fn parses_bare_string_ingredients() {
        let json = r##"{"key": {"#": "minecraft:stone"}}"##;
        assert_eq!(
            parse_recipe(json).unwrap(),
            RecipeIngredients::Keyed(vec!["minecraft:stone".to_string()])
        );
    }

    #[test]
    fn parses_positional_ingredient_list() {
        let json = r#"{"ingredients": [
            {"item": "minecraft:string"},
            {"item": "minecraft:white_wool"}]}"#;
        assert_eq!(
            parse_recipe(json).unwrap(),
            RecipeIngredients::Positional(vec![
                "minecraft:string".to_string(),
                "minecraft:white_wool".to_string()
            ])
        );
    }

    #[test]
    fn rejects_unknown_recipe_shapes() {
        assert!(matches!(
            parse_recipe(r#"{"result": {"id": "minecraft:cake"}}"#),
            Err(DeriveError::MalformedRecipe(_))
        ));
        assert!(matches!(
            parse_recipe(r#"{"key": {"X": {"item": "minecraft:stick"}}}"#),
            Err(DeriveError::MalformedRecipe(_))
        ));
        assert!(matches!(
            parse_recipe("not json"),
            Err(DeriveError::MalformedRecipe(_))
        ));
    }

    #[test]
    fn resolves_first_existing_slot() {
        let recipe = RecipeIngredients::Keyed(vec![
            "minecraft:missing_block".to_string(),
            "minecraft:stone".to_string(),
        ]);
        let base = resolve_base(&recipe, JAVA_TEXTURE_EXCEPTIONS, exists_in(&["stone"])).unwrap();
        assert_eq!(base, "stone");
    }

    #[test]
    fn exception_table_rewrites_before_existence_check() {
        // smooth_quartz has no texture of its own; the exception table
        // redirects it to quartz_block_bottom.
        let recipe = RecipeIngredients::Keyed(vec!["minecraft:smooth_quartz".to_string()]);
        let base = resolve_base(
            &recipe,
            JAVA_TEXTURE_EXCEPTIONS,
            exists_in(&["quartz_block_bottom"]),
        )
        .unwrap();
        assert_eq!(base, "quartz_block_bottom");
    }

    #[test]
    fn waxed_copper_alias_is_tried_first() {
        let recipe = RecipeIngredients::Keyed(vec!["minecraft:waxed_cut_copper".to_string()]);
        let base = resolve_base(
            &recipe,
            JAVA_TEXTURE_EXCEPTIONS,
            exists_in(&["cut_copper"]),
        )
        .unwrap();
        assert_eq!(base, "cut_copper");
    }

    #[test]
    fn base_not_found_when_nothing_exists() {
        let recipe = RecipeIngredients::Positional(vec!["minecraft:mystery".to_string()]);
        assert!(matches!(
            resolve_base(&recipe, JAVA_TEXTURE_EXCEPTIONS, exists_in(&[])),
            Err(DeriveError::BaseNotFound)
        ));
    }
}
