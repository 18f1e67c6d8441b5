#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Terrain {
    Normal,
    AttackBonus,
    DefenseBonus,
    Healing,
    ResourceGen,
}
