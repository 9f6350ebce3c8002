pub const SET_FROM_ID: &str = r"
select id, code, name, set_type, block_name, block_code, parent_set_code,
       release_date, card_count, digital_only, icon_uri
from card_set
where id = $1;
";

pub const SET_FROM_CODE: &str = r"
select id, code, name, set_type, block_name, block_code, parent_set_code,
       release_date, card_count, digital_only, icon_uri
from card_set
where code = $1;
";

pub const UPSERT_SET: &str = r"
insert into card_set (id, code, name, set_type, block_name, block_code, parent_set_code,
                      release_date, card_count, digital_only, icon_uri)
values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
on conflict (id) do update
    set code            = excluded.code,
        name            = excluded.name,
        set_type        = excluded.set_type,
        block_name      = excluded.block_name,
        block_code      = excluded.block_code,
        parent_set_code = excluded.parent_set_code,
        release_date    = excluded.release_date,
        card_count      = excluded.card_count,
        digital_only    = excluded.digital_only,
        icon_uri        = excluded.icon_uri;
";

pub const CARD_FROM_ID: &str = r"
select id, set_id, collector_number, name, rarity, promo, token,
       nonfoil_available, foil_available, full_art, extended_art,
       color_identity, mana_cost, mana_value, oracle_text,
       special_deck_restrictions, price, price_foil
from card
where id = $1;
";

pub const CARDS_FROM_COLLECTOR_NUMBER: &str = r"
select id, set_id, collector_number, name, rarity, promo, token,
       nonfoil_available, foil_available, full_art, extended_art,
       color_identity, mana_cost, mana_value, oracle_text,
       special_deck_restrictions, price, price_foil
from card
where set_id = $1
  and collector_number = $2;
";

pub const UPSERT_CARD: &str = r"
insert into card (id, set_id, collector_number, name, rarity, promo, token,
                  nonfoil_available, foil_available, full_art, extended_art,
                  color_identity, mana_cost, mana_value, oracle_text,
                  special_deck_restrictions, price, price_foil)
values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
on conflict (id) do update
    set set_id                    = excluded.set_id,
        collector_number          = excluded.collector_number,
        name                      = excluded.name,
        rarity                    = excluded.rarity,
        promo                     = excluded.promo,
        token                     = excluded.token,
        nonfoil_available         = excluded.nonfoil_available,
        foil_available            = excluded.foil_available,
        full_art                  = excluded.full_art,
        extended_art              = excluded.extended_art,
        color_identity            = excluded.color_identity,
        mana_cost                 = excluded.mana_cost,
        mana_value                = excluded.mana_value,
        oracle_text               = excluded.oracle_text,
        special_deck_restrictions = excluded.special_deck_restrictions,
        price                     = excluded.price,
        price_foil                = excluded.price_foil;
";

pub const VARIANT_FROM_ID: &str = r"
select id, original, variant_type
from card_variant
where id = $1;
";

pub const UPSERT_VARIANT: &str = r"
insert into card_variant (id, original, variant_type)
values ($1, $2, $3)
on conflict (id) do update
    set original     = excluded.original,
        variant_type = excluded.variant_type;
";
